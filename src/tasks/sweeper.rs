//! Expiration Sweeper
//!
//! Background task that periodically drops idle cache entries.
//!
//! The sweep period equals the entry TTL, so an expired entry can linger for
//! up to one more TTL before a sweep removes it. Reads re-check expiry on their
//! own, which makes this a memory bound rather than a correctness one.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::cache::CacheState;

/// Handle to a running expiration sweeper.
///
/// Dropping the handle stops the task without waiting for it; call
/// [`Sweeper::shutdown`] to wait for a sweep in progress to finish.
#[derive(Debug)]
pub struct Sweeper {
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Signals the task to stop and waits until it has exited.
    ///
    /// A sweep already holding the cache lock always completes first.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                error!(error = %err, "Expiration sweeper terminated abnormally");
                return;
            }
        }
        info!("Expiration sweeper stopped");
    }

    /// Returns true once the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Spawns a task that purges entries idle for longer than `ttl`, every `ttl`.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn spawn_sweeper<K, V>(state: Arc<Mutex<CacheState<K, V>>>, ttl: Duration) -> Sweeper
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Send + 'static,
{
    let (stop, mut stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!(
            "Starting expiration sweeper with a period of {} ms",
            ttl.as_millis()
        );

        let mut ticker = time::interval_at(Instant::now() + ttl, ttl);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut stopped => break,
                _ = ticker.tick() => {
                    let removed = {
                        let mut guard = state.lock().await;
                        guard.purge_expired(ttl, Instant::now())
                    };

                    if removed > 0 {
                        info!("Expiration sweep: removed {} idle entries", removed);
                    } else {
                        debug!("Expiration sweep: no idle entries found");
                    }
                }
            }
        }
    });

    Sweeper {
        stop: Some(stop),
        handle: Some(handle),
    }
}
