use super::store::WindowStore;
use super::sweep::Sweeper;
use super::types::{AdmissionDecision, RateLimitConfig, Window};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Fixed-window rate limiter keyed by client identity.
///
/// Each identity gets its own window of quota; rollover is lazy, so a
/// window is only replaced when a request for that identity finds it
/// expired. A background sweeper evicts windows no request comes back
/// for, once per window duration.
pub struct KeyedRateLimiter {
    store: Arc<WindowStore>,
    config: RateLimitConfig,
    sweeper: Sweeper,
}

impl KeyedRateLimiter {
    /// Create a new keyed rate limiter and start its sweep task. Must be
    /// called from within a tokio runtime.
    pub fn new(config: RateLimitConfig) -> Self {
        debug!(
            max_requests = config.max_requests,
            window = ?config.window,
            "creating keyed rate limiter"
        );
        let store = Arc::new(WindowStore::new());
        let sweeper = Sweeper::spawn(store.clone(), config.window());
        Self {
            store,
            config,
            sweeper,
        }
    }

    /// Decide whether to admit one request for `identity`.
    ///
    /// The whole check runs under the store's per-identity entry lock, so
    /// concurrent requests for one identity can never decrement the same
    /// window past zero.
    pub fn admit(&self, identity: &str) -> AdmissionDecision {
        let now = Instant::now();
        let window_len = self.config.window();
        let limit = self.config.max_requests;

        let decision = self.store.with_window(
            identity,
            || Window::new(limit, now),
            |window| {
                if window.is_expired(now, window_len) {
                    *window = Window::new(limit, now);
                }

                if window.remaining > 0 {
                    window.remaining -= 1;
                    AdmissionDecision::admitted(limit, window.remaining)
                } else {
                    AdmissionDecision::rejected(limit, window.retry_after_ms(now, window_len))
                }
            },
        );

        if !decision.allowed {
            warn!(
                identity,
                retry_after_ms = decision.retry_after_ms,
                "rate limit exceeded"
            );
        }

        decision
    }

    /// Stop the background sweep task. Safe to call more than once.
    pub fn shutdown(&self) {
        self.sweeper.stop();
    }

    /// Number of client windows currently tracked (for monitoring).
    pub fn active_windows(&self) -> usize {
        self.store.len()
    }

    /// The configuration this limiter was built with.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Access to the underlying store (for testing)
    #[cfg(test)]
    pub(crate) fn store(&self) -> &Arc<WindowStore> {
        &self.store
    }
}
