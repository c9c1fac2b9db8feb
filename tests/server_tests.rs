//! Handler tests driven through the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use sexton::server::database::Database;
use sexton::server::handlers::AppState;
use sexton::server::repository::CompanyRepository;
use sexton::server::routes::build_router;

/// Helper: build the application router over an in-memory SQLite database.
async fn setup_app() -> axum::Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("db connect failed");

    let db = Database::from_pool(pool);
    db.migrate().await.expect("migrate failed");

    let repo = Arc::new(CompanyRepository::new(Arc::new(db)));
    build_router(AppState { repo })
}

/// Helper: JSON request builder.
fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Helper: read a JSON response body.
async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

#[tokio::test]
async fn create_company_returns_created_record() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/companies",
            Some(json!({ "user_id": 7, "name": "Acme", "phone_number": "5551234567" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["user_id"], 7);
    assert!(body["time_stamp"].is_null());
    assert!(body["company_id"].is_string());
}

#[tokio::test]
async fn create_with_empty_name_is_bad_request() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/companies",
            Some(json!({ "user_id": 7, "name": "  " })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn get_missing_company_is_404_with_error_code() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request("GET", "/api/v1/companies/no-such-id", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "COMPANY_NOT_FOUND");
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let app = setup_app().await;

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/companies",
            Some(json!({ "user_id": 1, "name": "Globex" })),
        ))
        .await
        .unwrap();
    let created = json_body(created).await;
    let id = created["company_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request("GET", &format!("/api/v1/companies/{id}"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Globex");
}

#[tokio::test]
async fn list_companies_filters_by_user() {
    let app = setup_app().await;

    for (user_id, name) in [(1, "Acme"), (1, "Globex"), (2, "Initech")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/companies",
                Some(json!({ "user_id": user_id, "name": name })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/v1/companies", None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], 3);

    let response = app
        .oneshot(json_request("GET", "/api/v1/companies?user_id=1", None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn patch_sets_the_initial_countdown() {
    let app = setup_app().await;

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/companies",
            Some(json!({ "user_id": 3, "name": "Acme" })),
        ))
        .await
        .unwrap();
    let created = json_body(created).await;
    let id = created["company_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/companies/{id}"),
            Some(json!({ "time_stamp": 30, "level": 4 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["time_stamp"], 30);
    assert_eq!(body["level"], 4);
    assert_eq!(body["user_id"], 3);
}

#[tokio::test]
async fn health_endpoint_reports_database_status() {
    let app = setup_app().await;

    let response = app
        .oneshot(json_request("GET", "/api/v1/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sexton");
    assert_eq!(body["database"]["connected"], true);
}
