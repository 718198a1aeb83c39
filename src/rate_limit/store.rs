use super::types::Window;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::trace;

/// Concurrent home for per-client window state.
///
/// Backed by a sharded map so lookups from independent clients do not
/// contend. The map only ever holds one window per identity; expired
/// entries are replaced on access by the limiter and removed in bulk by
/// [`WindowStore::sweep`].
#[derive(Debug, Default)]
pub struct WindowStore {
    windows: DashMap<String, Window>,
}

impl WindowStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Look up the window for `identity`. Pure read, no side effect.
    pub fn get(&self, identity: &str) -> Option<Window> {
        self.windows.get(identity).map(|entry| *entry.value())
    }

    /// Insert or overwrite the window for `identity`.
    pub fn put(&self, identity: &str, window: Window) {
        self.windows.insert(identity.to_string(), window);
    }

    /// Run `f` against the window for `identity`, inserting the result of
    /// `fresh` first when the entry is absent. The entry's shard lock is
    /// held for the duration of `f`, so the check-and-decrement performed
    /// by the limiter is serialized per identity.
    pub fn with_window<T>(
        &self,
        identity: &str,
        fresh: impl FnOnce() -> Window,
        f: impl FnOnce(&mut Window) -> T,
    ) -> T {
        let mut entry = self
            .windows
            .entry(identity.to_string())
            .or_insert_with(fresh);
        f(entry.value_mut())
    }

    /// Remove every entry whose window is expired at `now`, returning the
    /// number of entries evicted. Each entry is re-checked under its shard
    /// lock at deletion time, so a window concurrently refreshed by an
    /// admission decision is never lost.
    pub fn sweep(&self, now: Instant, window: Duration) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, w| !w.is_expired(now, window));
        let evicted = before.saturating_sub(self.windows.len());
        trace!(evicted, tracked = self.windows.len(), "swept window store");
        evicted
    }

    /// Number of tracked client windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the store holds no windows.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
