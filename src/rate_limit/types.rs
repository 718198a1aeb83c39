use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Length of one fixed window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WindowDuration {
    /// Per-second window
    Second,
    /// Per-minute window
    Minute,
    /// Per-hour window
    Hour,
    /// Per-day window
    Day,
}

impl WindowDuration {
    /// Get the duration of this window.
    pub fn as_duration(&self) -> Duration {
        match self {
            WindowDuration::Second => Duration::from_millis(1_000),
            WindowDuration::Minute => Duration::from_millis(60_000),
            WindowDuration::Hour => Duration::from_millis(3_600_000),
            WindowDuration::Day => Duration::from_millis(86_400_000),
        }
    }

    /// Get the duration of this window in milliseconds.
    pub fn as_millis(&self) -> u64 {
        self.as_duration().as_millis() as u64
    }
}

/// Rate limit configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of requests allowed per window
    pub max_requests: u32,
    /// Length of the fixed window
    pub window: WindowDuration,
}

impl RateLimitConfig {
    /// Get the window as a Duration
    pub fn window(&self) -> Duration {
        self.window.as_duration()
    }
}

/// One fixed time slice of quota for one subject.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    /// Requests still permittable in this window
    pub remaining: u32,
    /// When this window began
    pub started_at: Instant,
}

impl Window {
    /// Create a fresh window with the full quota.
    pub fn new(max_requests: u32, now: Instant) -> Self {
        Self {
            remaining: max_requests,
            started_at: now,
        }
    }

    /// A window is expired once a full window duration has elapsed
    /// since it began.
    pub fn is_expired(&self, now: Instant, window: Duration) -> bool {
        now.duration_since(self.started_at) >= window
    }

    /// Milliseconds until this window ends, saturating at zero.
    pub fn retry_after_ms(&self, now: Instant, window: Duration) -> u64 {
        (self.started_at + window)
            .saturating_duration_since(now)
            .as_millis() as u64
    }
}

/// Outcome of one admission decision, with the metadata the caller
/// attaches to the response whether the request was admitted or not.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionDecision {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Total limit per window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Milliseconds until the window resets (0 when admitted)
    pub retry_after_ms: u64,
}

impl AdmissionDecision {
    /// Create an admitted decision
    pub fn admitted(limit: u32, remaining: u32) -> Self {
        Self {
            allowed: true,
            limit,
            remaining,
            retry_after_ms: 0,
        }
    }

    /// Create a rejected decision
    pub fn rejected(limit: u32, retry_after_ms: u64) -> Self {
        Self {
            allowed: false,
            limit,
            remaining: 0,
            retry_after_ms,
        }
    }
}
