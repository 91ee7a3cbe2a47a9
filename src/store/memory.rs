//! In-memory backing store for [`Entity`] records.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::Entity;
use crate::store::BackingStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Entity>,
    last_id: i64,
}

/// Entity table kept in process memory.
///
/// Identifiers are assigned like an identity column: monotonically, starting
/// at 1, and always past the largest id ever written.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted records.
    pub fn len(&self) -> usize {
        self.table().map(|table| table.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // The guard is never held across an await point.
    fn table(&self) -> Result<MutexGuard<'_, Table>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Backend("entity table lock poisoned".to_string()))
    }
}

#[async_trait]
impl BackingStore<Entity> for MemoryStore {
    async fn save(&self, mut entity: Entity) -> Result<Entity, StoreError> {
        let mut table = self.table()?;
        let id = match entity.id {
            Some(id) => id,
            None => table
                .last_id
                .checked_add(1)
                .ok_or_else(|| StoreError::Backend("id sequence exhausted".to_string()))?,
        };
        table.last_id = table.last_id.max(id);
        entity.id = Some(id);
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn exists_by_id(&self, id: &i64) -> Result<bool, StoreError> {
        Ok(self.table()?.rows.contains_key(id))
    }

    async fn delete_by_id(&self, id: &i64) -> Result<(), StoreError> {
        self.table()?.rows.remove(id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.table()?.rows.clear();
        Ok(())
    }

    async fn find_by_id(&self, id: &i64) -> Result<Option<Entity>, StoreError> {
        Ok(self.table()?.rows.get(id).cloned())
    }
}
