//! Integration tests for the public site router.
//!
//! The database is unreachable, so every page renders the default content.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use serde_json::json;

use linkbio_integration_tests::{body_text, get, post, send, site_app};

// ============================================================================
// Landing page
// ============================================================================

#[tokio::test]
async fn test_landing_renders_defaults_when_database_is_down() {
    let response = send(site_app(), get("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("content-security-policy"));
    assert!(response.headers().contains_key("x-request-id"));

    let html = body_text(response).await;
    assert!(html.contains("GRIFFES MIL GRAU"));
    assert!(html.contains("href=\"/go/main/0\""));
    assert!(html.contains("Link na Bio Premium"));
    assert!(!html.contains("Voltar ao Painel"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(site_app(), request).await;

    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let response = send(site_app(), get("/static/css/site.css")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(site_app(), get("/static/js/video-background.js")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_reports_database_down() {
    let response = send(site_app(), get("/health/ready")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = send(site_app(), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Tracked redirects
// ============================================================================

#[tokio::test]
async fn test_go_redirects_to_button_destination() {
    let response = send(site_app(), get("/go/main/0")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "https://catalogo.com");
}

#[tokio::test]
async fn test_go_attaches_whatsapp_message() {
    let response = send(site_app(), get("/go/main/2")).await;

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://wa.me/5511999999999?text=Ol%C3%A1%21"));
}

#[tokio::test]
async fn test_go_anchor_returns_to_page() {
    let response = send(site_app(), get("/go/secondary/1")).await;
    assert_eq!(response.headers()[header::LOCATION], "/#frete");
}

#[tokio::test]
async fn test_go_unknown_button_is_not_found() {
    let response = send(site_app(), get("/go/main/99")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(site_app(), get("/go/footer/0")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Events API
// ============================================================================

#[tokio::test]
async fn test_event_is_accepted() {
    let body = json!({
        "event_type": "button_click",
        "event_data": {"button_title": "FRETE", "button_href": "#frete"}
    });
    let response = send(
        site_app(),
        post("/api/events", "application/json", body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_event_with_unknown_type_is_rejected() {
    let body = json!({"event_type": "scroll", "event_data": {}});
    let response = send(
        site_app(),
        post("/api/events", "application/json", body.to_string()),
    )
    .await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_event_data_must_be_an_object() {
    let body = json!({"event_type": "page_view", "event_data": [1, 2]});
    let response = send(
        site_app(),
        post("/api/events", "application/json", body.to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
