//! Router-level tests that run without a live MongoDB: client construction
//! is lazy, and these routes never issue a store round trip.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use login_service::config::{LoginConfig, MongoConfig, ServerConfig};
use login_service::services::MongoDb;
use login_service::startup::{build_router, AppState};
use tower::util::ServiceExt;

async fn test_state() -> AppState {
    let config = LoginConfig {
        server: ServerConfig {
            port: 0,
            body_limit_bytes: 10 * 1024 * 1024,
        },
        mongodb: MongoConfig {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            database: "loginDB".to_string(),
        },
    };
    let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
        .await
        .expect("Client construction does not contact the server");
    AppState { config, db }
}

#[tokio::test]
async fn health_check_works() {
    let app = build_router(test_state().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "login-service");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_router(test_state().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/no-such-route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clear_users_rejects_get() {
    let app = build_router(test_state().await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/clearUsers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
