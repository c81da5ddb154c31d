use axum::{
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tracing::info;

use crate::configuration::Settings;
use crate::routes;
use crate::server::{
    handlers::{auth, browse, planning, similarity, sync_log},
    models::SessionState,
    services::{AuthService, CatalogService, EmbeddingService, SimilarityService},
};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    pub embedding: Arc<EmbeddingService>,
    pub similarity: Arc<SimilarityService>,
    /// Process-wide session, re-derived on every login/logout.
    pub session: Arc<RwLock<Option<SessionState>>>,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            auth: Arc::new(AuthService::new(
                settings.supabase_url.clone(),
                settings.supabase_anon_key.clone(),
            )),
            catalog: Arc::new(CatalogService::new(
                settings.supabase_url.clone(),
                settings.supabase_anon_key.clone(),
            )),
            embedding: Arc::new(EmbeddingService::new(settings.api_base_url.clone())),
            similarity: Arc::new(SimilarityService::new(settings.api_base_url.clone())),
            session: Arc::new(RwLock::new(None)),
        }
    }
}

pub fn configure_app(settings: &Settings) -> Router {
    app_router(AppState::from_settings(settings))
}

async fn log_request(request: Request, next: Next) -> Result<Response, StatusCode> {
    info!("{} {}", request.method(), request.uri().path());
    Ok(next.run(request).await)
}

fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/health", get(routes::health_check))
        .route("/login", get(auth::login_page).post(auth::handle_login))
        .route("/logout", post(auth::logout))
        .route("/panels/sync", get(sync_log::sync_panel))
        .route("/panels/planning", get(planning::planning_panel))
        .route("/panels/similarity", get(similarity::similarity_panel))
        .route("/panels/browse", get(browse::browse_panel))
        .route("/planning", post(planning::create))
        .route("/planning/new", get(planning::new_form))
        .route("/planning/:id/edit", get(planning::edit_form))
        .route("/planning/:id", post(planning::update))
        .route("/planning/:id/delete", post(planning::delete))
        .route("/browse/:id/delete", post(browse::delete))
        .route("/similarity/search", post(similarity::search))
        .nest_service("/static", ServeDir::new("./static"))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
