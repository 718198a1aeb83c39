use super::store::WindowStore;
use metrics::gauge;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time::interval;
use tracing::debug;

/// Periodic eviction task for a [`WindowStore`].
///
/// Ticks once per window duration and removes expired client windows,
/// bounding the store to the clients active within roughly one window.
/// The task listens on a watch channel for its stop signal, so `stop`
/// is idempotent and the task also winds down when the sweeper is
/// dropped with its limiter.
#[derive(Debug)]
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
}

impl Sweeper {
    /// Spawn the sweep task. Must be called from within a tokio runtime.
    pub fn spawn(store: Arc<WindowStore>, window: Duration) -> Self {
        let (shutdown, mut stopped) = watch::channel(false);

        tokio::spawn(async move {
            let mut ticker = interval(window);
            // The first tick of a tokio interval completes immediately;
            // consume it so sweeps start one full period after spawn.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = store.sweep(Instant::now(), window);
                        if evicted > 0 {
                            debug!(evicted, "evicted expired client windows");
                        }
                        gauge!("admission_active_windows").set(store.len() as f64);
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            debug!("window sweeper stopped");
                            break;
                        }
                    }
                }
            }
        });

        Self { shutdown }
    }

    /// Signal the sweep task to stop. Stopping an already-stopped sweeper
    /// is a no-op.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}
