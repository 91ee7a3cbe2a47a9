//! Entity record
//!
//! The persisted record cached by the service binary.

use serde::{Deserialize, Serialize};

use crate::store::Identifiable;

/// A named record whose `id` is assigned by the backing store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Store-assigned identifier, `None` until persisted
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Entity {
    /// Creates an entity that has not been persisted yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Creates an entity with an explicit identifier.
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }
}

impl Identifiable for Entity {
    type Id = i64;

    fn id(&self) -> Option<i64> {
        self.id
    }
}
