//! Fixed-window rate limiting
//!
//! This module provides the admission decision engine for the service:
//!
//! - **Keyed**: one window of quota per client identity, with a
//!   background sweeper that evicts windows of inactive clients
//! - **Global**: a single shared window for all requests
//!
//! Both variants return the same metadata on every decision (`limit`,
//! `remaining`, `retry_after_ms`), so the middleware can expose
//! `X-RateLimit-*` headers whether a request was admitted or rejected.
//!
//! # Example
//!
//! ```rust,no_run
//! use admission::rate_limit::{KeyedRateLimiter, RateLimitConfig, WindowDuration};
//!
//! #[tokio::main]
//! async fn main() {
//!     let limiter = KeyedRateLimiter::new(RateLimitConfig {
//!         max_requests: 5,
//!         window: WindowDuration::Minute,
//!     });
//!
//!     let decision = limiter.admit("1.2.3.4");
//!     assert!(decision.allowed);
//!     assert_eq!(decision.remaining, 4);
//!
//!     limiter.shutdown();
//! }
//! ```

pub mod global;
pub mod keyed;
pub mod middleware;
pub mod store;
pub mod sweep;
pub mod types;

// Re-export commonly used types
pub use global::GlobalRateLimiter;
pub use keyed::KeyedRateLimiter;
pub use middleware::admission_middleware;
pub use store::WindowStore;
pub use types::{AdmissionDecision, RateLimitConfig, Window, WindowDuration};

use crate::error::{AdmissionError, Result};

/// The admission engine wired into the server: one of the two limiter
/// variants, selected by configuration.
pub enum RateLimiter {
    /// Per-client quota keyed by IP address
    PerClient(KeyedRateLimiter),
    /// One shared quota for all requests
    Global(GlobalRateLimiter),
}

impl RateLimiter {
    /// Decide whether to admit one request.
    ///
    /// The keyed variant requires a resolved client identity and fails
    /// with [`AdmissionError::ClientIpNotFound`] without one; the global
    /// variant ignores `identity` entirely. A rejection is not an error:
    /// it comes back as a decision with `allowed == false`.
    pub fn admit(&self, identity: Option<&str>) -> Result<AdmissionDecision> {
        match self {
            RateLimiter::PerClient(limiter) => {
                let identity = identity.ok_or(AdmissionError::ClientIpNotFound)?;
                Ok(limiter.admit(identity))
            }
            RateLimiter::Global(limiter) => Ok(limiter.admit()),
        }
    }

    /// Stop any background work owned by the limiter. Idempotent.
    pub fn shutdown(&self) {
        if let RateLimiter::PerClient(limiter) = self {
            limiter.shutdown();
        }
    }
}
