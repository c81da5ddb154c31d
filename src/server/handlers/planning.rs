use askama::Template;
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::server::handlers::{blank_to_none, current_session, require_admin};
use crate::server::models::course::display_timestamp;
use crate::server::models::{CourseDraft, CourseInsert, CourseUpdate};
use crate::server::AppState;

pub const CAMPUSES: [&str; 3] = ["Main", "North", "South"];

#[derive(Template)]
#[template(path = "partials/planning_list.html")]
pub struct PlanningListTemplate {
    pub rows: Vec<PlanningRow>,
    pub is_admin: bool,
    pub error: Option<String>,
}

pub struct PlanningRow {
    pub id: String,
    pub title: String,
    pub campus: String,
    pub instructor: String,
    pub start_date: String,
    pub audience: String,
    pub level: String,
    pub updated_at: String,
}

#[derive(Template)]
#[template(path = "partials/planning_form.html")]
pub struct PlanningFormTemplate {
    pub heading: String,
    pub action: String,
    pub values: FormValues,
    pub campuses: &'static [&'static str],
    pub error: Option<String>,
}

#[derive(Default)]
pub struct FormValues {
    pub title: String,
    pub campus: String,
    pub instructor: String,
    pub start_date: String,
    pub audience: String,
    pub level: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PlanningForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PlanningForm {
    fn into_draft(self) -> CourseDraft {
        CourseDraft {
            title: self.title.trim().to_string(),
            campus: blank_to_none(self.campus),
            instructor: blank_to_none(self.instructor),
            start_date: blank_to_none(self.start_date),
            audience: blank_to_none(self.audience),
            level: blank_to_none(self.level),
            description: blank_to_none(self.description),
        }
    }
}

async fn render_list(state: &AppState, error: Option<String>) -> PlanningListTemplate {
    let session = current_session(state).await;
    let token = session.as_ref().map(|s| s.access_token.clone());
    let is_admin = session.map(|s| s.is_admin()).unwrap_or(false);

    match state.catalog.planning_courses(token.as_deref()).await {
        Ok(courses) => PlanningListTemplate {
            rows: courses
                .into_iter()
                .map(|c| PlanningRow {
                    id: c.id,
                    title: c.title.unwrap_or_default(),
                    campus: c.campus.unwrap_or_default(),
                    instructor: c.instructor.unwrap_or_default(),
                    start_date: c.start_date.unwrap_or_default(),
                    audience: c.audience.unwrap_or_default(),
                    level: c.level.unwrap_or_default(),
                    updated_at: c
                        .updated_at
                        .as_deref()
                        .map(display_timestamp)
                        .unwrap_or_default(),
                })
                .collect(),
            is_admin,
            error,
        },
        Err(e) => PlanningListTemplate {
            rows: Vec::new(),
            is_admin,
            error: Some(e.to_string()),
        },
    }
}

pub async fn planning_panel(State(state): State<AppState>) -> PlanningListTemplate {
    render_list(&state, None).await
}

pub async fn new_form(State(state): State<AppState>) -> Result<PlanningFormTemplate, StatusCode> {
    require_admin(&state).await?;
    Ok(PlanningFormTemplate {
        heading: "Add planning course".to_string(),
        action: "/planning".to_string(),
        values: FormValues::default(),
        campuses: &CAMPUSES,
        error: None,
    })
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, StatusCode> {
    let session = require_admin(&state).await?;
    let course = state
        .catalog
        .course(Some(&session.access_token), &id)
        .await
        .map_err(StatusCode::from)?;

    let Some(course) = course else {
        return Ok(render_list(&state, Some("Course not found.".to_string()))
            .await
            .into_response());
    };

    Ok(PlanningFormTemplate {
        heading: "Edit planning course".to_string(),
        action: format!("/planning/{}", course.id),
        values: FormValues {
            title: course.title.unwrap_or_default(),
            campus: course.campus.unwrap_or_default(),
            instructor: course.instructor.unwrap_or_default(),
            start_date: course.start_date.unwrap_or_default(),
            audience: course.audience.unwrap_or_default(),
            level: course.level.unwrap_or_default(),
            description: course.description.unwrap_or_default(),
        },
        campuses: &CAMPUSES,
        error: None,
    }
    .into_response())
}

/// Runs the shared submit pipeline: title check (silent abort), campus check
/// (blocking message), best-effort embedding, then the write.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<PlanningForm>,
) -> Result<Response, StatusCode> {
    let session = require_admin(&state).await?;
    let draft = form.into_draft();

    if draft.title.is_empty() {
        // Submitting without a title is dropped without comment.
        return Ok(render_list(&state, None).await.into_response());
    }
    if draft.campus.is_none() {
        return Ok(form_with_error(&draft, "/planning".to_string(), "Please choose a campus.")
            .into_response());
    }

    let embedding = state
        .embedding
        .generate(
            &draft.title,
            draft.description.as_deref(),
            draft.audience.as_deref(),
        )
        .await;

    let insert = CourseInsert::manual(draft, embedding);
    info!("creating planning course {}", insert.id);
    let error = state
        .catalog
        .insert_course(Some(&session.access_token), &insert)
        .await
        .err()
        .map(|e| format!("Could not save course: {}", e));

    Ok(render_list(&state, error).await.into_response())
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<PlanningForm>,
) -> Result<Response, StatusCode> {
    let session = require_admin(&state).await?;
    let draft = form.into_draft();

    if draft.title.is_empty() {
        return Ok(render_list(&state, None).await.into_response());
    }
    if draft.campus.is_none() {
        return Ok(form_with_error(
            &draft,
            format!("/planning/{}", id),
            "Please choose a campus.",
        )
        .into_response());
    }

    let embedding = state
        .embedding
        .generate(
            &draft.title,
            draft.description.as_deref(),
            draft.audience.as_deref(),
        )
        .await;

    let changes = CourseUpdate::from_draft(draft, embedding);
    info!("updating planning course {}", id);
    let error = state
        .catalog
        .update_course(Some(&session.access_token), &id, &changes)
        .await
        .err()
        .map(|e| format!("Could not update course: {}", e));

    Ok(render_list(&state, error).await.into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<PlanningListTemplate, StatusCode> {
    let session = require_admin(&state).await?;
    info!("deleting planning course {}", id);
    let error = state
        .catalog
        .delete_course(Some(&session.access_token), &id)
        .await
        .err()
        .map(|e| format!("Could not delete course: {}", e));

    Ok(render_list(&state, error).await)
}

fn form_with_error(draft: &CourseDraft, action: String, message: &str) -> PlanningFormTemplate {
    PlanningFormTemplate {
        heading: if action == "/planning" {
            "Add planning course".to_string()
        } else {
            "Edit planning course".to_string()
        },
        action,
        values: FormValues {
            title: draft.title.clone(),
            campus: draft.campus.clone().unwrap_or_default(),
            instructor: draft.instructor.clone().unwrap_or_default(),
            start_date: draft.start_date.clone().unwrap_or_default(),
            audience: draft.audience.clone().unwrap_or_default(),
            level: draft.level.clone().unwrap_or_default(),
            description: draft.description.clone().unwrap_or_default(),
        },
        campuses: &CAMPUSES,
        error: Some(message.to_string()),
    }
}
