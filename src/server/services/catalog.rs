use axum::http::StatusCode;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::server::models::{
    profile::Profile, Course, CourseInsert, CourseUpdate, Role, SyncLogEntry,
};

const COURSE_COLUMNS: &str =
    "id,class_code,title,campus,instructor,start_date,audience,level,description,status,source,updated_at";

/// Data access against the hosted catalog (Supabase PostgREST). Every method
/// is a single self-contained request; the service provides atomicity for
/// individual inserts, updates and deletes.
#[derive(Debug, Clone)]
pub struct CatalogService {
    client: Client,
    base_url: String,
    anon_key: Secret<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

impl From<CatalogError> for StatusCode {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Request(_) => StatusCode::BAD_GATEWAY,
            CatalogError::Api { status, .. } => status,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

impl CatalogService {
    pub fn new(base_url: String, anon_key: Secret<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    fn table(&self, name: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, name)
    }

    /// Requests run under the caller's token when a session exists so that
    /// the service's row-level rules see the real user; otherwise the anon
    /// key is used for both headers.
    fn authorize(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let anon = self.anon_key.expose_secret();
        builder
            .header("apikey", anon.as_str())
            .bearer_auth(token.unwrap_or(anon))
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<PostgrestError>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("catalog returned {}", status));
        Err(CatalogError::Api {
            status: StatusCode::from_u16(status.as_u16())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message,
        })
    }

    /// The five most recent ingestion runs, newest first.
    pub async fn recent_sync_runs(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<SyncLogEntry>, CatalogError> {
        let request = self
            .client
            .get(self.table("sync_log"))
            .query(&[("select", "*"), ("order", "run_at.desc"), ("limit", "5")]);
        let response = self.authorize(request, token).send().await?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    /// All planning-status records, most recently updated first.
    pub async fn planning_courses(&self, token: Option<&str>) -> Result<Vec<Course>, CatalogError> {
        let request = self.client.get(self.table("courses")).query(&[
            ("select", COURSE_COLUMNS),
            ("status", "eq.planning"),
            ("order", "updated_at.desc"),
        ]);
        let response = self.authorize(request, token).send().await?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    /// Every course regardless of status, by start date ascending.
    pub async fn all_courses(&self, token: Option<&str>) -> Result<Vec<Course>, CatalogError> {
        let request = self.client.get(self.table("courses")).query(&[
            ("select", COURSE_COLUMNS),
            ("order", "start_date.asc"),
        ]);
        let response = self.authorize(request, token).send().await?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    pub async fn course(
        &self,
        token: Option<&str>,
        id: &str,
    ) -> Result<Option<Course>, CatalogError> {
        let filter = format!("eq.{}", id);
        let request = self.client.get(self.table("courses")).query(&[
            ("select", COURSE_COLUMNS),
            ("id", filter.as_str()),
        ]);
        let mut rows: Vec<Course> = Self::expect_success(self.authorize(request, token).send().await?)
            .await?
            .json()
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    pub async fn insert_course(
        &self,
        token: Option<&str>,
        course: &CourseInsert,
    ) -> Result<(), CatalogError> {
        let request = self
            .client
            .post(self.table("courses"))
            .header("Prefer", "return=minimal")
            .json(course);
        Self::expect_success(self.authorize(request, token).send().await?).await?;
        Ok(())
    }

    pub async fn update_course(
        &self,
        token: Option<&str>,
        id: &str,
        changes: &CourseUpdate,
    ) -> Result<(), CatalogError> {
        let request = self
            .client
            .patch(self.table("courses"))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(changes);
        Self::expect_success(self.authorize(request, token).send().await?).await?;
        Ok(())
    }

    pub async fn delete_course(&self, token: Option<&str>, id: &str) -> Result<(), CatalogError> {
        let request = self
            .client
            .delete(self.table("courses"))
            .query(&[("id", format!("eq.{}", id))]);
        Self::expect_success(self.authorize(request, token).send().await?).await?;
        Ok(())
    }

    /// Role lookup for a signed-in user. A missing profile row or a failed
    /// lookup resolves to the default role rather than an error.
    pub async fn profile_role(&self, token: Option<&str>, user_id: &str) -> Role {
        let filter = format!("eq.{}", user_id);
        let request = self
            .client
            .get(self.table("profiles"))
            .query(&[("select", "role"), ("id", filter.as_str())]);
        let response = match self.authorize(request, token).send().await {
            Ok(r) => r,
            Err(_) => return Role::default(),
        };
        let rows: Vec<Profile> = match Self::expect_success(response).await {
            Ok(r) => r.json().await.unwrap_or_default(),
            Err(_) => return Role::default(),
        };
        rows.first()
            .and_then(|p| p.role.as_deref())
            .map(Role::from_str_or_default)
            .unwrap_or_default()
    }
}
