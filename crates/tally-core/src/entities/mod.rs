//! Entity structs for Tally domain objects.
//!
//! Lists and todos are identified by a [`EntityId`] allocated from a
//! per-session counter. Ids are never reused inside a session, so deleting an
//! entity does not shift the address of any other one.

mod list;
mod todo;

pub use list::TodoList;
pub use todo::Todo;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a list or todo within one session.
pub type EntityId = u64;

/// The kinds of entity a session holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    List,
    Todo,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Todo => "todo",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
