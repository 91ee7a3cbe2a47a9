//! Backing Store Module
//!
//! The durable key-value collaborator the cache writes through to and reads
//! from on a miss.

mod memory;

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::MemoryStore;

/// A value that carries its own store-assigned identifier.
///
/// `id()` is `None` until the store has persisted the value.
pub trait Identifiable: Clone + Send + Sync + 'static {
    /// Identifier assigned by the backing store.
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> Option<Self::Id>;
}

/// Durable store contract used by the cache.
///
/// Every operation is a single awaited call; the cache never batches them.
#[async_trait]
pub trait BackingStore<V: Identifiable>: Send + Sync {
    /// Persists `value`, assigning an identifier when it has none, and returns
    /// the canonical stored form.
    async fn save(&self, value: V) -> Result<V, StoreError>;

    async fn exists_by_id(&self, id: &V::Id) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: &V::Id) -> Result<(), StoreError>;

    async fn delete_all(&self) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &V::Id) -> Result<Option<V>, StoreError>;
}

#[async_trait]
impl<V, S> BackingStore<V> for Arc<S>
where
    V: Identifiable,
    S: BackingStore<V> + ?Sized,
{
    async fn save(&self, value: V) -> Result<V, StoreError> {
        (**self).save(value).await
    }

    async fn exists_by_id(&self, id: &V::Id) -> Result<bool, StoreError> {
        (**self).exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: &V::Id) -> Result<(), StoreError> {
        (**self).delete_by_id(id).await
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        (**self).delete_all().await
    }

    async fn find_by_id(&self, id: &V::Id) -> Result<Option<V>, StoreError> {
        (**self).find_by_id(id).await
    }
}
