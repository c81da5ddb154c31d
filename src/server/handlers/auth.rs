use askama::Template;
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::server::{
    models::{Role, SessionState},
    AppState,
};

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Re-derives the process-wide session from the auth service: resolves the
/// current user for the stored token and looks up the profile role, falling
/// back to the default role when no profile row exists. Clears the session
/// when the token no longer maps to a user.
pub async fn refresh_auth(state: &AppState) {
    let token = state
        .session
        .read()
        .await
        .as_ref()
        .map(|s| s.access_token.clone());

    let Some(token) = token else {
        *state.session.write().await = None;
        return;
    };

    match state.auth.current_user(&token).await {
        Ok(Some(user)) => {
            let role = state.catalog.profile_role(Some(&token), &user.id).await;
            *state.session.write().await = Some(SessionState {
                access_token: token,
                user_id: user.id,
                email: user.email.unwrap_or_default(),
                role,
            });
        }
        Ok(None) => {
            *state.session.write().await = None;
        }
        Err(e) => {
            warn!("session refresh failed, clearing session: {}", e);
            *state.session.write().await = None;
        }
    }
}

pub async fn login_page() -> LoginTemplate {
    LoginTemplate {
        title: "Log in".to_string(),
        error: None,
    }
}

/// Credential check is delegated entirely to the auth service. A rejection
/// re-renders the form with the service-provided message and leaves the
/// session untouched.
pub async fn handle_login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.auth.sign_in(&form.email, &form.password).await {
        Ok(auth_session) => {
            info!("login succeeded for user {}", auth_session.user.id);
            *state.session.write().await = Some(SessionState {
                access_token: auth_session.access_token,
                user_id: auth_session.user.id,
                email: auth_session.user.email.unwrap_or(form.email),
                role: Role::default(),
            });
            refresh_auth(&state).await;
            Redirect::to("/").into_response()
        }
        Err(e) => {
            warn!("login failed: {}", e);
            LoginTemplate {
                title: "Log in".to_string(),
                error: Some(format!("Login failed: {}", e)),
            }
            .into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> Redirect {
    let token = state
        .session
        .read()
        .await
        .as_ref()
        .map(|s| s.access_token.clone());
    if let Some(token) = token {
        state.auth.sign_out(&token).await;
    }
    *state.session.write().await = None;
    refresh_auth(&state).await;
    // Back to the default panel.
    Redirect::to("/")
}
