//! Error types for state operations.
//!
//! Validation failures are user-facing and their `Display` output is shown
//! verbatim in the error flash. `NotFound` covers ids that do not resolve to a
//! list or todo in the current session.

use thiserror::Error;

use crate::entities::{EntityId, EntityKind};
use crate::validation::ValidationError;

/// Errors raised by [`SessionState`](crate::SessionState) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The addressed list or todo does not exist in this session.
    #[error("Entity not found: {entity} {id}")]
    NotFound { entity: EntityKind, id: EntityId },

    /// Submitted input failed a name rule; nothing was mutated.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    #[must_use]
    pub const fn not_found(entity: EntityKind, id: EntityId) -> Self {
        Self::NotFound { entity, id }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
