use reqwest::Client;
use tracing::warn;

use crate::server::models::Embedding;

/// Best-effort enrichment client for the embedding-generation endpoint. A
/// failure here never blocks the write it decorates, so the API is
/// `Option`, not `Result`.
#[derive(Debug, Clone)]
pub struct EmbeddingService {
    client: Client,
    base_url: String,
}

impl EmbeddingService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn generate(
        &self,
        title: &str,
        description: Option<&str>,
        audience: Option<&str>,
    ) -> Option<Embedding> {
        let response = self
            .client
            .post(format!("{}/api/generate-embedding", self.base_url))
            .json(&serde_json::json!({
                "title": title,
                "description": description.unwrap_or(""),
                "audience": audience.unwrap_or(""),
            }))
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                warn!("embedding API unreachable, saving course without embedding: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "embedding generation returned {}, saving course without embedding",
                response.status()
            );
            return None;
        }

        match response.json::<Embedding>().await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                warn!("embedding response malformed, saving course without embedding: {}", e);
                None
            }
        }
    }
}
