use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Client for the external similarity-search endpoint. Search parameters are
/// forwarded in a single request; ranking and scoring happen entirely on the
/// other side.
#[derive(Debug, Clone)]
pub struct SimilarityService {
    client: Client,
    base_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityQuery {
    pub query: String,
    pub level: Option<String>,
    pub n_days_back: i64,
    pub n_days_forward: i64,
    pub top_k: i64,
    /// 0–1 fraction; callers convert from the percentage slider.
    pub min_similarity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimilarityHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    #[serde(default)]
    results: Vec<SimilarityHit>,
}

#[derive(Debug, Deserialize)]
struct SimilarityErrorBody {
    detail: Option<String>,
}

/// The two failure shapes the panel distinguishes: the request completed
/// with an error status, or it never completed at all.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    #[error("{detail}")]
    Api { detail: String },
    #[error("similarity API unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),
}

impl SimilarityService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(
        &self,
        query: &SimilarityQuery,
    ) -> Result<Vec<SimilarityHit>, SimilarityError> {
        let response = self
            .client
            .post(format!("{}/api/similarity", self.base_url))
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<SimilarityErrorBody>()
                .await
                .ok()
                .and_then(|e| e.detail)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("similarity search failed")
                        .to_string()
                });
            warn!("similarity API returned {}: {}", status, detail);
            return Err(SimilarityError::Api { detail });
        }

        let body = response
            .json::<SimilarityResponse>()
            .await
            .map_err(SimilarityError::Unreachable)?;
        Ok(body.results)
    }
}
