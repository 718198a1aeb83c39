use admission::{
    build_router,
    config::{AppConfig, RateLimitSettings, RateLimitStrategy, ServerConfig},
    rate_limit::WindowDuration,
    AppState,
};
use axum::{body::Body, extract::ConnectInfo, Router};
use http::{Request, StatusCode};
use std::net::SocketAddr;
use tower::ServiceExt;

/// Helper to build a test application with the given admission settings
fn setup_test_app(
    strategy: RateLimitStrategy,
    max_requests: u32,
    window: WindowDuration,
) -> Router {
    let config = AppConfig {
        server: ServerConfig::default(),
        rate_limit: RateLimitSettings {
            strategy,
            max_requests,
            window,
        },
    };

    build_router(AppState::from_config(&config, None))
}

/// Helper to build a GET request carrying a peer address
fn request_from(addr: &str, uri: &str) -> Request<Body> {
    let addr: SocketAddr = addr.parse().unwrap();
    Request::builder()
        .uri(uri)
        .method("GET")
        .extension(ConnectInfo(addr))
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_products_list() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 5, WindowDuration::Minute);

    let response = app
        .oneshot(request_from("1.2.3.4:5000", "/products"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("product-name-001"));
    assert!(body.contains("product-name-002"));
}

#[tokio::test]
async fn test_product_by_id() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 5, WindowDuration::Minute);

    let response = app
        .oneshot(request_from("1.2.3.4:5000", "/products/001"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["product_id"], "001");
    assert_eq!(body["product_name"], "product-name-001");
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 5, WindowDuration::Minute);

    let response = app
        .oneshot(request_from("1.2.3.4:5000", "/products/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Product not found: 999");
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_admitted_responses_carry_rate_limit_headers() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 5, WindowDuration::Minute);

    for expected_remaining in ["4", "3", "2", "1", "0"] {
        let response = app
            .clone()
            .oneshot(request_from("1.2.3.4:5000", "/products"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers.get("X-RateLimit-Limit").unwrap(), "5");
        assert_eq!(
            headers.get("X-RateLimit-Remaining").unwrap(),
            expected_remaining
        );
        assert_eq!(headers.get("X-RateLimit-RetryAfter").unwrap(), "0");
    }
}

#[tokio::test]
async fn test_exhausted_quota_returns_429() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 2, WindowDuration::Minute);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request_from("1.2.3.4:5000", "/products"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(request_from("1.2.3.4:5000", "/products"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let headers = response.headers();
    assert_eq!(headers.get("X-RateLimit-Limit").unwrap(), "2");
    assert_eq!(headers.get("X-RateLimit-Remaining").unwrap(), "0");
    assert!(headers.get("Retry-After").is_some());
    let retry_after_ms: u64 = headers
        .get("X-RateLimit-RetryAfter")
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after_ms > 0 && retry_after_ms <= 60_000);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Rate limit exceeded");
    assert_eq!(body["status"], 429);
    assert!(body["retry_after_ms"].as_u64().unwrap() <= 60_000);
}

#[tokio::test]
async fn test_quotas_are_isolated_per_client() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 1, WindowDuration::Minute);

    let response = app
        .clone()
        .oneshot(request_from("1.2.3.4:5000", "/products"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request_from("1.2.3.4:5000", "/products"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different client still gets through
    let response = app
        .oneshot(request_from("5.6.7.8:5000", "/products"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_peer_address_is_400() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 5, WindowDuration::Minute);

    // No ConnectInfo on the request: identity cannot be resolved
    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"], "Client IP not found");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_global_strategy_shares_quota_across_clients() {
    let app = setup_test_app(RateLimitStrategy::Global, 2, WindowDuration::Minute);

    for addr in ["1.2.3.4:5000", "5.6.7.8:5000"] {
        let response = app
            .clone()
            .oneshot(request_from(addr, "/products"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Third request from a third client is rejected: one shared window
    let response = app
        .clone()
        .oneshot(request_from("9.9.9.9:5000", "/products"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // The global variant admits even without a peer address
    let app = setup_test_app(RateLimitStrategy::Global, 2, WindowDuration::Minute);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 5, WindowDuration::Minute);

    let response = app
        .oneshot(request_from("1.2.3.4:5000", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app(RateLimitStrategy::PerClient, 5, WindowDuration::Minute);

    let response = app
        .oneshot(request_from("1.2.3.4:5000", "/products"))
        .await
        .unwrap();

    assert!(response.headers().get("x-request-id").is_some());
}
