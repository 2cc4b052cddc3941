//! # tally-core
//!
//! Core types for Tally, a session-backed todo list manager.
//!
//! This crate owns everything that does not touch I/O:
//! - Entity structs for lists and todos, addressed by stable per-session ids
//! - The per-client [`SessionState`] with every list/todo mutator
//! - Name validators and their user-facing messages
//! - The single-slot flash side channel
//! - Cross-cutting error types
//!
//! Transport, templating and session storage live in `tally-web` and
//! `tally-session`.

pub mod entities;
pub mod errors;
pub mod flash;
pub mod messages;
pub mod state;
pub mod validation;

pub use entities::{EntityId, EntityKind, Todo, TodoList};
pub use errors::CoreError;
pub use flash::Flash;
pub use state::SessionState;
pub use validation::{NameSubject, ValidationError};

/// Interpret the `completed` form parameter of a toggle request.
///
/// Only the literal string `"true"` counts as completed; anything else,
/// including `"TRUE"` or an empty value, marks the todo open.
#[must_use]
pub fn parse_completed(value: &str) -> bool {
    value == "true"
}

#[cfg(test)]
mod tests {
    use super::parse_completed;

    #[test]
    fn only_literal_true_is_completed() {
        assert!(parse_completed("true"));
        assert!(!parse_completed("false"));
        assert!(!parse_completed("TRUE"));
        assert!(!parse_completed(" true"));
        assert!(!parse_completed(""));
    }
}
