use serde::Deserialize;

/// One row of the ingestion history. Written exclusively by the external sync
/// process; this panel only reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncLogEntry {
    pub run_at: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub courses_upserted: Option<i64>,
}
