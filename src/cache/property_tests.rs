//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the recency map against a reference model and the
//! facade against its size and durability guarantees.

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::time::Instant;

use crate::cache::{EntityCache, RecencyMap};
use crate::config::Config;
use crate::error::CacheError;
use crate::models::Entity;
use crate::store::MemoryStore;

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..12
}

#[derive(Debug, Clone)]
enum MapOp {
    Put(u8),
    Get(u8),
    Remove(u8),
    Clear,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => key_strategy().prop_map(MapOp::Put),
        3 => key_strategy().prop_map(MapOp::Get),
        2 => key_strategy().prop_map(MapOp::Remove),
        1 => Just(MapOp::Clear),
    ]
}

#[derive(Debug, Clone)]
enum CacheOp {
    Add(i64),
    Get(i64),
    Remove(i64),
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (1i64..15).prop_map(CacheOp::Add),
        3 => (1i64..15).prop_map(CacheOp::Get),
        1 => (1i64..15).prop_map(CacheOp::Remove),
        1 => Just(CacheOp::Clear),
    ]
}

fn start_cache(max_size: usize) -> EntityCache<Entity, Arc<MemoryStore>> {
    let config = Config::default().with_max_size(max_size);
    EntityCache::start(Arc::new(MemoryStore::new()), &config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence, the map matches a simple most-recent-first
    // list model: same keys, same order, same eviction victims.
    #[test]
    fn prop_recency_map_matches_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(map_op_strategy(), 1..80)
    ) {
        let now = Instant::now();
        let mut map = RecencyMap::new(capacity);
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                MapOp::Put(key) => {
                    let existed = model.contains(&key);
                    model.retain(|k| *k != key);
                    model.insert(0, key);
                    let expected = if !existed && model.len() > capacity {
                        model.pop()
                    } else {
                        None
                    };

                    let evicted = map.put(key, u32::from(key), now);
                    prop_assert_eq!(evicted.map(|(k, _)| k), expected);
                }
                MapOp::Get(key) => {
                    let hit = map.get(&key).is_some();
                    prop_assert_eq!(hit, model.contains(&key));
                    if hit {
                        model.retain(|k| *k != key);
                        model.insert(0, key);
                    }
                }
                MapOp::Remove(key) => {
                    map.remove(&key);
                    model.retain(|k| *k != key);
                }
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            prop_assert!(map.len() <= capacity, "size {} exceeds {}", map.len(), capacity);
            prop_assert!(map.is_consistent(), "order and entries diverged");
            let order: Vec<u8> = map.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(&order, &model);
        }
    }

    // For any sequence of facade operations, the cache never holds more than
    // max_size entries.
    #[test]
    fn prop_cache_respects_max_size(
        max_size in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let result: Result<(), TestCaseError> = tokio_test::block_on(async {
            let cache = start_cache(max_size);
            for op in ops {
                match op {
                    CacheOp::Add(id) => {
                        cache.add(Entity::with_id(id, format!("entity {}", id))).await.unwrap();
                    }
                    CacheOp::Get(id) => {
                        match cache.get(id).await {
                            Ok(_) | Err(CacheError::NotFound(_)) => {}
                            Err(err) => return Err(TestCaseError::fail(err.to_string())),
                        }
                    }
                    CacheOp::Remove(id) => cache.remove(id).await.unwrap(),
                    CacheOp::Clear => cache.clear().await,
                }
                let len = cache.len().await;
                prop_assert!(len <= max_size, "cache size {} exceeds {}", len, max_size);
            }
            Ok(())
        });
        result?;
    }

    // Eviction never loses data: every added id stays retrievable, from
    // memory or from the store.
    #[test]
    fn prop_evicted_entities_remain_durable(
        max_size in 1usize..4,
        ids in prop::collection::vec(1i64..20, 1..30)
    ) {
        let result: Result<(), TestCaseError> = tokio_test::block_on(async {
            let cache = start_cache(max_size);
            let added: BTreeSet<i64> = ids.iter().copied().collect();

            for id in &ids {
                cache.add(Entity::with_id(*id, format!("entity {}", id))).await.unwrap();
            }
            for id in &added {
                let entity = cache.get(*id).await.unwrap();
                let expected = format!("entity {}", id);
                prop_assert_eq!(entity.name.as_deref(), Some(expected.as_str()));
            }
            Ok(())
        });
        result?;
    }

    // add followed by get is a memory hit returning the canonical value.
    #[test]
    fn prop_add_then_get_hits_memory(name in "[a-zA-Z0-9 ]{1,32}") {
        let result: Result<(), TestCaseError> = tokio_test::block_on(async {
            let cache = start_cache(5);
            let saved = cache.add(Entity::named(name.clone())).await.unwrap();
            let before = cache.stats().await;

            let fetched = cache.get(saved.id).await.unwrap();

            let after = cache.stats().await;
            prop_assert_eq!(&fetched, &saved);
            prop_assert_eq!(after.hits, before.hits + 1);
            prop_assert_eq!(after.misses, before.misses);
            Ok(())
        });
        result?;
    }
}
