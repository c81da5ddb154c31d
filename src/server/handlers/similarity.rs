use askama::Template;
use axum::extract::{Form, State};
use serde::Deserialize;

use crate::server::handlers::blank_to_none;
use crate::server::services::SimilarityQuery;
use crate::server::AppState;

#[derive(Template)]
#[template(path = "partials/similarity.html")]
pub struct SimilarityPanelTemplate {
    pub days_back: i64,
    pub days_forward: i64,
    pub min_similarity: i64,
    pub top_k: i64,
}

#[derive(Template)]
#[template(path = "partials/similarity_results.html")]
pub struct SimilarityResultsTemplate {
    pub hits: Vec<HitView>,
    pub error: Option<String>,
}

pub struct HitView {
    pub title: String,
    pub planning: bool,
    pub campus: String,
    pub start_date: String,
    pub level: String,
    pub similarity_pct: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default = "default_window")]
    pub days_back: i64,
    #[serde(default = "default_window")]
    pub days_forward: i64,
    /// Percentage as shown on the slider; converted to a fraction on send.
    #[serde(default)]
    pub min_similarity: f64,
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

fn default_window() -> i64 {
    100
}

fn default_top_k() -> i64 {
    10
}

pub async fn similarity_panel() -> SimilarityPanelTemplate {
    SimilarityPanelTemplate {
        days_back: default_window(),
        days_forward: default_window(),
        min_similarity: 0,
        top_k: default_top_k(),
    }
}

/// One outbound request per submission. Error-status responses render the
/// server-provided detail; a request that never completes renders a
/// connectivity hint naming the configured backend.
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> SimilarityResultsTemplate {
    let request = SimilarityQuery {
        query: form.query.trim().to_string(),
        level: blank_to_none(form.level),
        n_days_back: form.days_back,
        n_days_forward: form.days_forward,
        top_k: form.top_k,
        min_similarity: form.min_similarity / 100.0,
    };

    match state.similarity.search(&request).await {
        Ok(hits) => SimilarityResultsTemplate {
            hits: hits
                .into_iter()
                .map(|hit| HitView {
                    title: hit.title.unwrap_or_default(),
                    planning: hit.status.as_deref() == Some("planning"),
                    campus: hit.campus.unwrap_or_default(),
                    start_date: hit.start_date.unwrap_or_default(),
                    level: hit.level.unwrap_or_default(),
                    similarity_pct: hit
                        .similarity
                        .map(|s| format!("{}%", (s * 100.0).round() as i64))
                        .unwrap_or_else(|| "-".to_string()),
                })
                .collect(),
            error: None,
        },
        Err(e) => SimilarityResultsTemplate {
            hits: Vec::new(),
            error: Some(match e {
                crate::server::services::SimilarityError::Api { detail } => {
                    format!("Search failed: {}", detail)
                }
                crate::server::services::SimilarityError::Unreachable(_) => format!(
                    "Could not reach the similarity API at {}. Check that the backend server is running.",
                    state.similarity.base_url()
                ),
            }),
        },
    }
}
