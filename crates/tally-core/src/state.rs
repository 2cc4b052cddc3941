//! Per-client session state and every list/todo mutation.
//!
//! All operations take raw form input and trim it before validating. On
//! success they set the success flash; on failure nothing is mutated and the
//! caller decides how to surface the error (usually via [`SessionState::set_error`]).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{EntityId, EntityKind, Todo, TodoList};
use crate::errors::CoreError;
use crate::flash::Flash;
use crate::messages;
use crate::validation::{validate_list_name, validate_todo_name};

const fn first_id() -> EntityId {
    1
}

/// Everything one client owns: its lists, the id counter and the flash slots.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionState {
    #[serde(default)]
    pub lists: Vec<TodoList>,
    /// Next id to hand out. Shared by lists and todos, never decremented.
    #[serde(default = "first_id")]
    pub next_id: EntityId,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            lists: Vec::new(),
            next_id: first_id(),
            error: None,
            success: None,
        }
    }
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn position_of(&self, list_id: EntityId) -> Result<usize, CoreError> {
        self.lists
            .iter()
            .position(|list| list.id == list_id)
            .ok_or(CoreError::not_found(EntityKind::List, list_id))
    }

    // -----------------------------------------------------------------------
    // Flash
    // -----------------------------------------------------------------------

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Return and clear both flash slots.
    pub fn take_flash(&mut self) -> Flash {
        Flash {
            error: self.error.take(),
            success: self.success.take(),
        }
    }

    /// Copy of both flash slots, leaving them set.
    #[must_use]
    pub fn peek_flash(&self) -> Flash {
        Flash {
            error: self.error.clone(),
            success: self.success.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    /// Look up a list by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no list in this session has `list_id`.
    pub fn list(&self, list_id: EntityId) -> Result<&TodoList, CoreError> {
        self.lists
            .iter()
            .find(|list| list.id == list_id)
            .ok_or(CoreError::not_found(EntityKind::List, list_id))
    }

    /// Mutable lookup by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no list in this session has `list_id`.
    pub fn list_mut(&mut self, list_id: EntityId) -> Result<&mut TodoList, CoreError> {
        self.lists
            .iter_mut()
            .find(|list| list.id == list_id)
            .ok_or(CoreError::not_found(EntityKind::List, list_id))
    }

    /// Positional access, in insertion order.
    #[must_use]
    pub fn list_at(&self, index: usize) -> Option<&TodoList> {
        self.lists.get(index)
    }

    /// Incomplete lists first, then complete ones; insertion order within each group.
    pub fn lists_for_display(&self) -> impl Iterator<Item = &TodoList> {
        let open = self.lists.iter().filter(|list| !list.is_complete());
        let done = self.lists.iter().filter(|list| list.is_complete());
        open.chain(done)
    }

    /// Append a new empty list and return its id.
    ///
    /// # Errors
    ///
    /// `Validation` when the trimmed name is out of bounds or already taken.
    pub fn create_list(&mut self, name: &str) -> Result<EntityId, CoreError> {
        let name = name.trim();
        validate_list_name(name, &self.lists)?;

        let id = self.allocate_id();
        self.lists.push(TodoList::new(id, name));
        self.set_success(messages::LIST_CREATED);
        Ok(id)
    }

    /// Overwrite a list's name in place.
    ///
    /// The uniqueness rule is the same as for creation, so submitting the
    /// list's current name is rejected as a duplicate.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `Validation` for a rejected name.
    pub fn rename_list(&mut self, list_id: EntityId, name: &str) -> Result<(), CoreError> {
        let position = self.position_of(list_id)?;
        let name = name.trim();
        validate_list_name(name, &self.lists)?;

        self.lists[position].name = name.to_owned();
        self.set_success(messages::LIST_UPDATED);
        Ok(())
    }

    /// Remove a list and hand it back. Other lists keep their ids.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub fn delete_list(&mut self, list_id: EntityId) -> Result<TodoList, CoreError> {
        let position = self.position_of(list_id)?;
        let removed = self.lists.remove(position);
        self.set_success(messages::list_deleted(&removed.name));
        Ok(removed)
    }

    /// Mark every todo of a list completed. A no-op on an empty list.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown list id.
    pub fn complete_all(&mut self, list_id: EntityId) -> Result<(), CoreError> {
        for todo in &mut self.list_mut(list_id)?.todos {
            todo.completed = true;
        }
        self.set_success(messages::ALL_TODOS_COMPLETED);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Todos
    // -----------------------------------------------------------------------

    /// Append an open todo to a list and return its id.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown list id, `Validation` for a rejected name.
    pub fn add_todo(&mut self, list_id: EntityId, name: &str) -> Result<EntityId, CoreError> {
        let position = self.position_of(list_id)?;
        let name = name.trim();
        validate_todo_name(name)?;

        let id = self.allocate_id();
        self.lists[position].todos.push(Todo::new(id, name));
        self.set_success(messages::TODO_ADDED);
        Ok(id)
    }

    /// Remove a todo from its list and hand it back.
    ///
    /// # Errors
    ///
    /// `NotFound` when either the list or the todo does not exist.
    pub fn delete_todo(&mut self, list_id: EntityId, todo_id: EntityId) -> Result<Todo, CoreError> {
        let position = self.position_of(list_id)?;
        let todos = &mut self.lists[position].todos;
        let index = todos
            .iter()
            .position(|todo| todo.id == todo_id)
            .ok_or(CoreError::not_found(EntityKind::Todo, todo_id))?;

        let removed = todos.remove(index);
        self.set_success(messages::TODO_DELETED);
        Ok(removed)
    }

    /// Set a todo's completion flag.
    ///
    /// # Errors
    ///
    /// `NotFound` when either the list or the todo does not exist.
    pub fn set_todo_completed(
        &mut self,
        list_id: EntityId,
        todo_id: EntityId,
        completed: bool,
    ) -> Result<(), CoreError> {
        let todo = self
            .list_mut(list_id)?
            .todo_mut(todo_id)
            .ok_or(CoreError::not_found(EntityKind::Todo, todo_id))?;

        todo.completed = completed;
        self.set_success(messages::TODO_UPDATED);
        Ok(())
    }
}
