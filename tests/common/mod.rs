#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use secrecy::Secret;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coursedesk::configuration::{ApplicationSettings, Settings};
use coursedesk::server::config::configure_app;

pub fn test_settings(supabase_url: &str, api_base_url: &str) -> Settings {
    Settings {
        application: ApplicationSettings::default(),
        supabase_url: supabase_url.to_string(),
        supabase_anon_key: Secret::new("test-anon-key".to_string()),
        api_base_url: api_base_url.to_string(),
    }
}

pub fn test_app(supabase_url: &str, api_base_url: &str) -> Router {
    configure_app(&test_settings(supabase_url, api_base_url))
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), 16 * 1024 * 1024).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

pub async fn post_form(app: &Router, uri: &str, form_body: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(form_body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), 16 * 1024 * 1024).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Mocks the auth service endpoints for a user whose profile resolves to the
/// given role.
pub async fn mock_auth(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-access-token",
            "user": { "id": "user-1", "email": "ops@example.com" }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "ops@example.com"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "role": role }])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Signs in through the real login handler so the app's session state is
/// populated the same way it is in production.
pub async fn log_in(app: &Router) {
    let (status, _) = post_form(app, "/login", "email=ops%40example.com&password=secret").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
}
