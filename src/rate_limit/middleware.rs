use super::types::AdmissionDecision;
use crate::error::AdmissionError;
use crate::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::counter;
use std::net::SocketAddr;
use tracing::debug;

/// Axum middleware applying the admission decision to every request.
///
/// Resolves the client identity from the connection peer address, asks
/// the limiter, and translates the outcome: admitted requests continue
/// downstream and pick up the rate-limit headers on their response;
/// rejected requests are answered with 429 and a retry hint; requests
/// whose peer address cannot be resolved are answered with 400.
pub async fn admission_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let identity = client_ip(&request);
    counter!("admission_requests_total").increment(1);

    let decision = match state.limiter.admit(identity.as_deref()) {
        Ok(decision) => decision,
        Err(err) => {
            counter!("admission_rejected_total", "reason" => "no_client_ip").increment(1);
            return err.into_response();
        }
    };

    if decision.allowed {
        debug!(
            identity = identity.as_deref().unwrap_or("-"),
            remaining = decision.remaining,
            "request admitted"
        );
        let response = next.run(request).await;
        with_rate_limit_headers(response, &decision)
    } else {
        counter!("admission_rejected_total", "reason" => "quota_exhausted").increment(1);
        let response = AdmissionError::RateLimitExceeded {
            retry_after_ms: decision.retry_after_ms,
        }
        .into_response();
        with_rate_limit_headers(response, &decision)
    }
}

/// Resolve the client identity from the connection's peer address.
fn client_ip(request: &Request) -> Option<String> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
}

/// Attach the decision metadata as `X-RateLimit-*` headers. On 429
/// responses the standard `Retry-After` header (whole seconds, rounded
/// up) is included as well.
fn with_rate_limit_headers(mut response: Response, decision: &AdmissionDecision) -> Response {
    let headers = response.headers_mut();

    headers.insert(
        "X-RateLimit-Limit",
        HeaderValue::from_str(&decision.limit.to_string()).unwrap(),
    );
    headers.insert(
        "X-RateLimit-Remaining",
        HeaderValue::from_str(&decision.remaining.to_string()).unwrap(),
    );
    headers.insert(
        "X-RateLimit-RetryAfter",
        HeaderValue::from_str(&decision.retry_after_ms.to_string()).unwrap(),
    );

    if !decision.allowed {
        let retry_after_secs = decision.retry_after_ms.div_ceil(1_000);
        headers.insert(
            "Retry-After",
            HeaderValue::from_str(&retry_after_secs.to_string()).unwrap(),
        );
    }

    response
}
