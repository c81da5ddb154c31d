use axum::http::StatusCode;

mod common;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = common::test_app("http://localhost:54321", "http://localhost:8000");

    // Act
    let (status, body) = common::get(&app, "/health").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "healthy");
}
