//! Cache Facade Module
//!
//! Public cache operations composing the recency map with the backing store
//! under a single exclusive lock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheState, CacheStats};
use crate::config::Config;
use crate::error::{CacheError, Result, StoreError};
use crate::store::{BackingStore, Identifiable};
use crate::tasks::{spawn_sweeper, Sweeper};

// == Entity Cache ==
/// Bounded, expiring cache in front of a [`BackingStore`].
///
/// Every operation, reads included, holds one exclusive lock for its whole
/// duration, store calls too. A slow store therefore stalls every caller, and
/// store calls carry no timeout.
pub struct EntityCache<V, S>
where
    V: Identifiable,
{
    state: Arc<Mutex<CacheState<V::Id, V>>>,
    store: S,
    ttl: Duration,
    sweeper: Sweeper,
}

impl<V, S> EntityCache<V, S>
where
    V: Identifiable,
    S: BackingStore<V>,
{
    // == Constructor ==
    /// Validates `config`, builds an empty cache over `store` and starts the
    /// expiration sweeper.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(store: S, config: &Config) -> Result<Self> {
        config.validate()?;

        let ttl = config.expiration();
        let state = Arc::new(Mutex::new(CacheState::new(config.max_size)));
        let sweeper = spawn_sweeper(state.clone(), ttl);

        info!(
            max_size = config.max_size,
            expiration_ms = config.expiration_millis,
            "Entity cache started"
        );

        Ok(Self {
            state,
            store,
            ttl,
            sweeper,
        })
    }

    // == Add ==
    /// Writes `value` through to the store and caches the canonical result.
    ///
    /// Nothing is cached if the store rejects the write. When caching pushes
    /// another entry out, that entry is saved back to the store; a failed
    /// write-back is logged and counted but does not fail the call.
    pub async fn add(&self, value: impl Into<Option<V>>) -> Result<V> {
        let value = value.into().ok_or_else(|| {
            CacheError::InvalidInput("cannot add a missing entity to the cache".to_string())
        })?;

        let mut state = self.state.lock().await;

        let stored = self.store.save(value).await.map_err(|err| {
            error!(error = %err, "Error adding entity to cache");
            CacheError::store("saving entity before caching", err)
        })?;

        let id = stored.id().ok_or_else(|| {
            error!("Store acknowledged an entity without assigning an id");
            CacheError::store(
                "saving entity before caching",
                StoreError::Backend("saved entity has no id".to_string()),
            )
        })?;

        self.cache_value(&mut state, id.clone(), stored.clone()).await;
        info!(id = ?id, "Entity added/updated in cache");

        Ok(stored)
    }

    // == Get ==
    /// Returns the entity for `id`, from memory when fresh, otherwise from the
    /// store (re-caching it).
    pub async fn get(&self, id: impl Into<Option<V::Id>>) -> Result<V> {
        let id = id.into().ok_or_else(|| {
            CacheError::InvalidInput("cannot get an entity without a valid id".to_string())
        })?;

        let mut state = self.state.lock().await;
        let now = Instant::now();

        // None = miss, Some(None) = stale, Some(Some(_)) = fresh hit
        let cached = state.entries.get(&id).map(|entry| {
            if entry.is_expired(self.ttl, now) {
                None
            } else {
                entry.touch(now);
                Some(entry.value.clone())
            }
        });

        match cached {
            Some(Some(value)) => {
                state.stats.record_hit();
                info!(id = ?id, "Entity found in cache");
                return Ok(value);
            }
            Some(None) => {
                state.entries.remove(&id);
                state.stats.record_expirations(1);
                state.sync_size();
                debug!(id = ?id, "Cached entity expired; consulting store");
            }
            None => {}
        }
        state.stats.record_miss();

        let found = self.store.find_by_id(&id).await.map_err(|err| {
            error!(id = ?id, error = %err, "Error getting entity from store");
            CacheError::store(format!("fetching entity {:?}", id), err)
        })?;

        match found {
            Some(value) => {
                self.cache_value(&mut state, id.clone(), value.clone()).await;
                info!(id = ?id, "Entity fetched from store and added to cache");
                Ok(value)
            }
            None => Err(CacheError::NotFound(format!(
                "entity with id {:?} not found in cache or store",
                id
            ))),
        }
    }

    // == Remove ==
    /// Drops `id` from memory and deletes it from the store.
    ///
    /// A key the store does not hold is logged as an anomaly, not an error.
    pub async fn remove(&self, id: impl Into<Option<V::Id>>) -> Result<()> {
        let id = id.into().ok_or_else(|| {
            CacheError::InvalidInput("cannot remove an entity without a valid id".to_string())
        })?;

        let mut state = self.state.lock().await;
        state.entries.remove(&id);
        state.sync_size();

        let exists = self.store.exists_by_id(&id).await.map_err(|err| {
            error!(id = ?id, error = %err, "Error removing entity");
            CacheError::store(format!("checking entity {:?} before delete", id), err)
        })?;

        if !exists {
            warn!(id = ?id, "Attempted to remove entity that does not exist in store");
            return Ok(());
        }

        self.store.delete_by_id(&id).await.map_err(|err| {
            error!(id = ?id, error = %err, "Error removing entity");
            CacheError::store(format!("deleting entity {:?}", id), err)
        })?;
        info!(id = ?id, "Entity removed from cache and store");

        Ok(())
    }

    // == Remove All ==
    /// Empties the cache and truncates the store. Store failures are logged.
    pub async fn remove_all(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.sync_size();

        match self.store.delete_all().await {
            Ok(()) => info!("All entities removed from cache and store"),
            Err(err) => warn!(error = %err, "Cache emptied but store truncation failed"),
        }
    }

    // == Clear ==
    /// Empties the cache without touching the store.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.sync_size();
        info!("Cache cleared; store untouched");
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub async fn stats(&self) -> CacheStats {
        let mut state = self.state.lock().await;
        state.sync_size();
        state.stats.clone()
    }

    /// Number of entries currently held in memory.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// True when no entries are held in memory.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// True when `id` is held in memory, fresh or not. Does not affect recency.
    pub async fn contains(&self, id: &V::Id) -> bool {
        self.state.lock().await.entries.contains(id)
    }

    /// Idle time after which an entry is considered expired.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Shutdown ==
    /// Stops the expiration sweeper and waits for it to exit.
    pub async fn shutdown(self) {
        self.sweeper.shutdown().await;
        info!("Entity cache shut down");
    }

    /// Caches `value` under `id` and writes back whatever the insert evicted.
    async fn cache_value(&self, state: &mut CacheState<V::Id, V>, id: V::Id, value: V) {
        let evicted = state.entries.put(id, value, Instant::now());
        state.sync_size();

        let Some((evicted_id, evicted)) = evicted else {
            return;
        };

        state.stats.record_eviction();
        info!(id = ?evicted_id, "Evicting entity to store due to size limit");

        if let Err(err) = self.store.save(evicted.value).await {
            state.stats.record_write_back_failure();
            error!(
                id = ?evicted_id,
                error = %err,
                "Failed to save evicted entity to store"
            );
        }
    }
}
