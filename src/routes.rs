use askama::Template;
use axum::{extract::State, Json};
use serde_json::json;

use crate::server::handlers::current_session;
use crate::server::AppState;

#[derive(Template)]
#[template(path = "layouts/base.html")]
pub struct IndexTemplate {
    pub title: String,
    pub user_label: String,
    pub logged_in: bool,
    pub is_admin: bool,
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

/// Application shell: header with identity label, tab bar, and the panel
/// container. The default panel (similarity) is fetched on load; each tab
/// activation re-fetches its panel.
pub async fn home(State(state): State<AppState>) -> IndexTemplate {
    let session = current_session(&state).await;
    IndexTemplate {
        title: "Course Catalog Admin".to_string(),
        user_label: session
            .as_ref()
            .map(|s| s.display_label())
            .unwrap_or_default(),
        logged_in: session.is_some(),
        is_admin: session.map(|s| s.is_admin()).unwrap_or(false),
    }
}
