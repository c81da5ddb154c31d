use axum::http::StatusCode;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tracing::warn;

/// Client for the hosted auth service (Supabase GoTrue). Credential checks
/// and sign-out are delegated entirely; nothing is verified locally.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Client,
    base_url: String,
    anon_key: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful password grant: the bearer token and the authenticated subject.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("auth service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected auth service response: {0}")]
    Unexpected(String),
}

impl From<AuthError> for StatusCode {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            AuthError::Request(_) => StatusCode::BAD_GATEWAY,
            AuthError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueError {
    #[serde(alias = "error_description", alias = "msg", alias = "message")]
    detail: Option<String>,
}

impl AuthService {
    pub fn new(base_url: String, anon_key: Secret<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    /// `signInWithPassword` equivalent. A rejected credential check surfaces
    /// the service-provided message; session state is left to the caller.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url
            ))
            .header("apikey", self.anon_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let detail = response
                .json::<GoTrueError>()
                .await
                .ok()
                .and_then(|e| e.detail)
                .unwrap_or_else(|| "sign-in rejected".to_string());
            return Err(AuthError::InvalidCredentials(detail));
        }

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| AuthError::Unexpected(e.to_string()))
    }

    /// Resolves the user behind an access token. An expired or revoked token
    /// is not an error; it simply means there is no current session.
    pub async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AuthError::Unexpected(format!(
                "user lookup returned {}",
                response.status()
            )));
        }

        let user = response
            .json::<AuthUser>()
            .await
            .map_err(|e| AuthError::Unexpected(e.to_string()))?;
        Ok(Some(user))
    }

    /// Best-effort sign-out; a failure still clears local state upstream.
    pub async fn sign_out(&self, access_token: &str) {
        let result = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await;

        if let Err(e) = result {
            warn!("sign-out request failed: {}", e);
        }
    }
}
