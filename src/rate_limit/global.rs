use super::types::{AdmissionDecision, RateLimitConfig, Window};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, warn};

/// Fixed-window rate limiter with a single shared window.
///
/// Every request, regardless of origin, draws from the same quota. Used
/// when per-client differentiation is unnecessary or unavailable. The
/// window lives behind a mutex; the critical section is a handful of
/// arithmetic operations, so admission stays bounded and fast.
pub struct GlobalRateLimiter {
    window: Mutex<Window>,
    config: RateLimitConfig,
}

impl GlobalRateLimiter {
    /// Create a new global rate limiter with a full window starting now.
    pub fn new(config: RateLimitConfig) -> Self {
        debug!(
            max_requests = config.max_requests,
            window = ?config.window,
            "creating global rate limiter"
        );
        Self {
            window: Mutex::new(Window::new(config.max_requests, Instant::now())),
            config,
        }
    }

    /// Decide whether to admit one request against the shared window.
    pub fn admit(&self) -> AdmissionDecision {
        let now = Instant::now();
        let window_len = self.config.window();
        let limit = self.config.max_requests;

        let mut window = self.window.lock().expect("window lock poisoned");

        if window.is_expired(now, window_len) {
            *window = Window::new(limit, now);
        }

        if window.remaining > 0 {
            window.remaining -= 1;
            AdmissionDecision::admitted(limit, window.remaining)
        } else {
            let decision = AdmissionDecision::rejected(limit, window.retry_after_ms(now, window_len));
            drop(window);
            warn!(
                retry_after_ms = decision.retry_after_ms,
                "global rate limit exceeded"
            );
            decision
        }
    }

    /// The configuration this limiter was built with.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}
