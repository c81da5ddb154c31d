pub mod auth;
pub mod browse;
pub mod planning;
pub mod similarity;
pub mod sync_log;

use axum::http::StatusCode;

use crate::server::{models::SessionState, AppState};

pub(crate) async fn current_session(state: &AppState) -> Option<SessionState> {
    state.session.read().await.clone()
}

/// Mutating catalog operations are admin-only; everyone else gets a 403
/// regardless of what the rendered page offered them.
pub(crate) async fn require_admin(state: &AppState) -> Result<SessionState, StatusCode> {
    match current_session(state).await {
        Some(session) if session.is_admin() => Ok(session),
        _ => Err(StatusCode::FORBIDDEN),
    }
}

/// Blank form inputs become explicit nulls on the wire.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
