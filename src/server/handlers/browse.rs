use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::server::handlers::{current_session, require_admin};
use crate::server::AppState;

#[derive(Template)]
#[template(path = "partials/browse_table.html")]
pub struct BrowseTemplate {
    pub rows: Vec<BrowseRow>,
    pub is_admin: bool,
    pub error: Option<String>,
}

pub struct BrowseRow {
    pub id: String,
    pub class_code: String,
    pub title: String,
    pub campus: String,
    pub instructor: String,
    pub start_date: String,
    pub audience: String,
    pub level: String,
}

async fn render_table(state: &AppState, error: Option<String>) -> BrowseTemplate {
    let session = current_session(state).await;
    let token = session.as_ref().map(|s| s.access_token.clone());
    let is_admin = session.map(|s| s.is_admin()).unwrap_or(false);

    match state.catalog.all_courses(token.as_deref()).await {
        Ok(courses) => BrowseTemplate {
            rows: courses
                .into_iter()
                .map(|c| BrowseRow {
                    id: c.id,
                    class_code: c.class_code.unwrap_or_default(),
                    title: c.title.unwrap_or_default(),
                    campus: c.campus.unwrap_or_default(),
                    instructor: c.instructor.unwrap_or_default(),
                    start_date: c.start_date.unwrap_or_default(),
                    audience: c.audience.unwrap_or_default(),
                    level: c.level.unwrap_or_default(),
                })
                .collect(),
            is_admin,
            error,
        },
        Err(e) => BrowseTemplate {
            rows: Vec::new(),
            is_admin,
            error: Some(e.to_string()),
        },
    }
}

/// Full catalog listing, start date ascending, every status included.
pub async fn browse_panel(State(state): State<AppState>) -> BrowseTemplate {
    render_table(&state, None).await
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<BrowseTemplate, StatusCode> {
    let session = require_admin(&state).await?;
    info!("deleting course {}", id);
    let error = state
        .catalog
        .delete_course(Some(&session.access_token), &id)
        .await
        .err()
        .map(|e| format!("Could not delete course: {}", e));

    Ok(render_table(&state, error).await)
}
