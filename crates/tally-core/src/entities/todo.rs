use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::EntityId;

/// A single named task with a completion flag, owned by exactly one list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Todo {
    pub id: EntityId,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    /// New todos always start open.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }
}
