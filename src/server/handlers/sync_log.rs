use askama::Template;
use axum::extract::State;

use crate::server::handlers::current_session;
use crate::server::models::course::display_timestamp;
use crate::server::AppState;

#[derive(Template)]
#[template(path = "partials/sync_log.html")]
pub struct SyncLogTemplate {
    pub lines: Vec<SyncLogLine>,
    pub error: Option<String>,
}

pub struct SyncLogLine {
    pub run_at: String,
    pub status: String,
    pub message: String,
    pub courses_upserted: i64,
}

/// Read-only view of the most recent ingestion runs. Re-fetched on every
/// panel activation.
pub async fn sync_panel(State(state): State<AppState>) -> SyncLogTemplate {
    let token = current_session(&state).await.map(|s| s.access_token);
    match state.catalog.recent_sync_runs(token.as_deref()).await {
        Ok(entries) => SyncLogTemplate {
            lines: entries
                .into_iter()
                .map(|entry| SyncLogLine {
                    run_at: entry.run_at.as_deref().map(display_timestamp).unwrap_or_default(),
                    status: entry.status.unwrap_or_default(),
                    message: entry.message.unwrap_or_default(),
                    courses_upserted: entry.courses_upserted.unwrap_or(0),
                })
                .collect(),
            error: None,
        },
        Err(e) => SyncLogTemplate {
            lines: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}
