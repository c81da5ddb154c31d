use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn sync_panel_renders_recent_runs() {
    let supabase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sync_log"))
        .and(query_param("order", "run_at.desc"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "run_at": "2026-08-28T03:00:00Z",
                "status": "ok",
                "message": "nightly run",
                "courses_upserted": 12
            },
            {
                "run_at": "2026-08-27T03:00:00Z",
                "status": "ok",
                "message": "nightly run",
                "courses_upserted": 0
            }
        ])))
        .expect(1)
        .mount(&supabase)
        .await;
    let app = common::test_app(&supabase.uri(), "http://localhost:8000");

    let (status, html) = common::get(&app, "/panels/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("2026-08-28 03:00"));
    assert!(html.contains("12 rows upserted"));
}

#[tokio::test]
async fn sync_panel_shows_empty_message() {
    let supabase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sync_log"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&supabase)
        .await;
    let app = common::test_app(&supabase.uri(), "http://localhost:8000");

    let (_, html) = common::get(&app, "/panels/sync").await;
    assert!(html.contains("No sync runs yet"));
}

#[tokio::test]
async fn sync_panel_shows_error_message() {
    let supabase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sync_log"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "backend down" })),
        )
        .mount(&supabase)
        .await;
    let app = common::test_app(&supabase.uri(), "http://localhost:8000");

    let (status, html) = common::get(&app, "/panels/sync").await;
    // Errors stay inside the panel; the page itself still renders.
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Could not load sync log"));
    assert!(html.contains("backend down"));
}

#[tokio::test]
async fn every_activation_refetches() {
    let supabase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/sync_log"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&supabase)
        .await;
    let app = common::test_app(&supabase.uri(), "http://localhost:8000");

    for _ in 0..3 {
        let (status, _) = common::get(&app, "/panels/sync").await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn browse_panel_orders_by_start_date() {
    let supabase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/courses"))
        .and(query_param("order", "start_date.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "tis:A1",
                "class_code": "A1",
                "title": "Watercolor Basics",
                "campus": "Main",
                "start_date": "2026-09-01",
                "status": "confirmed"
            },
            {
                "id": "manual:b2",
                "title": "Intro to Pottery",
                "start_date": "2026-10-01",
                "status": "planning"
            }
        ])))
        .expect(1)
        .mount(&supabase)
        .await;
    let app = common::test_app(&supabase.uri(), "http://localhost:8000");

    let (status, html) = common::get(&app, "/panels/browse").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("A1"));
    assert!(html.contains("Watercolor Basics"));
    // Planning records have no class code but still appear in the listing.
    assert!(html.contains("Intro to Pottery"));
}

#[tokio::test]
async fn planning_panel_filters_by_status() {
    let supabase = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/courses"))
        .and(query_param("status", "eq.planning"))
        .and(query_param("order", "updated_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "manual:b2",
            "title": "Intro to Pottery",
            "campus": "North",
            "status": "planning",
            "updated_at": "2026-08-20T10:00:00Z"
        }])))
        .expect(1)
        .mount(&supabase)
        .await;
    let app = common::test_app(&supabase.uri(), "http://localhost:8000");

    let (status, html) = common::get(&app, "/panels/planning").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Intro to Pottery"));
    assert!(html.contains("2026-08-20 10:00"));
}
