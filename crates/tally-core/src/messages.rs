//! User-facing status messages written to the flash slots.

pub const LIST_CREATED: &str = "The list has been created.";
pub const LIST_UPDATED: &str = "The list has been updated.";
pub const TODO_ADDED: &str = "The todo has been added.";
pub const TODO_DELETED: &str = "The todo has been deleted.";
pub const TODO_UPDATED: &str = "The todo has been updated.";
pub const ALL_TODOS_COMPLETED: &str = "All todos have been completed.";
pub const LIST_NOT_FOUND: &str = "The specified list was not found.";
pub const TODO_NOT_FOUND: &str = "The specified todo was not found.";

#[must_use]
pub fn list_deleted(name: &str) -> String {
    format!("The list '{name}' has been deleted.")
}
