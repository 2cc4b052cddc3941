//! Name validation for lists and todos.
//!
//! Validators expect input that has already been trimmed. Lengths count
//! characters, not bytes, so a 100-character name in any script is accepted.

use std::ops::RangeInclusive;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::TodoList;

/// Accepted name length, in characters, for both lists and todos.
pub const NAME_LENGTH: RangeInclusive<usize> = 1..=100;

/// What a name belongs to; only affects the wording of the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NameSubject {
    List,
    Todo,
}

impl NameSubject {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::List => "List name",
            Self::Todo => "Todo",
        }
    }
}

/// A rejected name. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{} must be between 1 and 100 characters.", .subject.label())]
    InvalidLength { subject: NameSubject },

    #[error("List name must be unique.")]
    DuplicateName,
}

fn check_length(name: &str, subject: NameSubject) -> Result<(), ValidationError> {
    if NAME_LENGTH.contains(&name.chars().count()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLength { subject })
    }
}

/// Length first, then exact (case-sensitive) uniqueness against every list.
///
/// # Errors
///
/// `InvalidLength` when the name is empty or too long, `DuplicateName` when
/// another list already carries the exact same name.
pub fn validate_list_name(name: &str, lists: &[TodoList]) -> Result<(), ValidationError> {
    check_length(name, NameSubject::List)?;
    if lists.iter().any(|list| list.name == name) {
        return Err(ValidationError::DuplicateName);
    }
    Ok(())
}

/// Todos only have a length rule; duplicates are fine.
///
/// # Errors
///
/// `InvalidLength` when the name is empty or longer than 100 characters.
pub fn validate_todo_name(name: &str) -> Result<(), ValidationError> {
    check_length(name, NameSubject::Todo)
}
