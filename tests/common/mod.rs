//! Shared test double: an entity store that counts calls, can be told to
//! fail specific operations, and can stall saves.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use entity_cache::models::Entity;
use entity_cache::{BackingStore, Config, MemoryStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Save,
    Exists,
    Delete,
    DeleteAll,
    Find,
}

#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryStore,
    saves: AtomicUsize,
    exists: AtomicUsize,
    deletes: AtomicUsize,
    delete_alls: AtomicUsize,
    finds: AtomicUsize,
    saved_ids: Mutex<Vec<i64>>,
    failing: Mutex<HashSet<Op>>,
    rejected_ids: Mutex<HashSet<i64>>,
    save_delay: Mutex<Option<Duration>>,
    strip_ids: AtomicBool,
    /// Notified whenever a delayed save starts waiting
    pub save_entered: Notify,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes directly to the underlying table without counting.
    pub async fn seed(&self, entity: Entity) -> Entity {
        self.inner.save(entity).await.unwrap()
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    /// Makes every save of the given id fail.
    pub fn reject_saves_of(&self, id: i64) {
        self.rejected_ids.lock().unwrap().insert(id);
    }

    /// Makes saves succeed but hand back the entity without an id.
    pub fn strip_ids_on_save(&self) {
        self.strip_ids.store(true, Ordering::SeqCst);
    }

    pub fn delay_saves(&self, delay: Duration) {
        *self.save_delay.lock().unwrap() = Some(delay);
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn exists_checks(&self) -> usize {
        self.exists.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn delete_alls(&self) -> usize {
        self.delete_alls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.saves() + self.finds() + self.exists_checks() + self.deletes() + self.delete_alls()
    }

    /// Ids of every successful save, in call order.
    pub fn saved_ids(&self) -> Vec<i64> {
        self.saved_ids.lock().unwrap().clone()
    }

    pub fn stored(&self) -> usize {
        self.inner.len()
    }

    fn check(&self, op: Op) -> Result<(), StoreError> {
        if self.failing.lock().unwrap().contains(&op) {
            Err(StoreError::Unavailable(format!("{:?} rejected", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BackingStore<Entity> for CountingStore {
    async fn save(&self, entity: Entity) -> Result<Entity, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Save)?;

        if let Some(id) = entity.id {
            if self.rejected_ids.lock().unwrap().contains(&id) {
                return Err(StoreError::Backend(format!("save of {} rejected", id)));
            }
        }

        let delay = *self.save_delay.lock().unwrap();
        if let Some(delay) = delay {
            self.save_entered.notify_one();
            tokio::time::sleep(delay).await;
        }

        let mut saved = self.inner.save(entity).await?;
        if let Some(id) = saved.id {
            self.saved_ids.lock().unwrap().push(id);
        }
        if self.strip_ids.load(Ordering::SeqCst) {
            saved.id = None;
        }
        Ok(saved)
    }

    async fn exists_by_id(&self, id: &i64) -> Result<bool, StoreError> {
        self.exists.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Exists)?;
        self.inner.exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: &i64) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Delete)?;
        self.inner.delete_by_id(id).await
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.delete_alls.fetch_add(1, Ordering::SeqCst);
        self.check(Op::DeleteAll)?;
        self.inner.delete_all().await
    }

    async fn find_by_id(&self, id: &i64) -> Result<Option<Entity>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.check(Op::Find)?;
        self.inner.find_by_id(id).await
    }
}

pub fn config(max_size: usize) -> Config {
    Config::default().with_max_size(max_size)
}

pub fn entity(id: i64) -> Entity {
    Entity::with_id(id, format!("Entity {}", id))
}
