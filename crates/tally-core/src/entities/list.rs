use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{EntityId, Todo};

/// A named, ordered collection of todos.
///
/// `todos` keeps insertion order. The counting helpers below are computed on
/// demand and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TodoList {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.todos.len()
    }

    #[must_use]
    pub fn items_remaining(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// A list is complete when it has at least one todo and none are open.
    /// Empty lists are never complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total_items() > 0 && self.items_remaining() == 0
    }

    #[must_use]
    pub fn todo(&self, id: EntityId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn todo_mut(&mut self, id: EntityId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }

    /// Open todos first, then completed ones; insertion order within each group.
    pub fn todos_for_display(&self) -> impl Iterator<Item = &Todo> {
        let open = self.todos.iter().filter(|todo| !todo.completed);
        let done = self.todos.iter().filter(|todo| todo.completed);
        open.chain(done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(states: &[bool]) -> TodoList {
        let mut list = TodoList::new(1, "Groceries");
        for (offset, completed) in states.iter().enumerate() {
            let mut todo = Todo::new(10 + offset as EntityId, format!("item {offset}"));
            todo.completed = *completed;
            list.todos.push(todo);
        }
        list
    }

    #[test]
    fn empty_list_is_not_complete() {
        let list = list_with(&[]);
        assert_eq!(list.total_items(), 0);
        assert_eq!(list.items_remaining(), 0);
        assert!(!list.is_complete());
    }

    #[test]
    fn counts_open_todos() {
        let list = list_with(&[true, false, false]);
        assert_eq!(list.total_items(), 3);
        assert_eq!(list.items_remaining(), 2);
        assert!(!list.is_complete());
    }

    #[test]
    fn all_done_is_complete() {
        assert!(list_with(&[true, true]).is_complete());
    }

    #[test]
    fn display_order_puts_completed_last() {
        let list = list_with(&[true, false, true, false]);
        let ids: Vec<EntityId> = list.todos_for_display().map(|todo| todo.id).collect();
        assert_eq!(ids, vec![11, 13, 10, 12]);
    }

    #[test]
    fn lookup_by_id() {
        let mut list = list_with(&[false, false]);
        assert_eq!(list.todo(11).map(|todo| todo.name.as_str()), Some("item 1"));
        assert!(list.todo(99).is_none());

        if let Some(todo) = list.todo_mut(10) {
            todo.completed = true;
        }
        assert_eq!(list.items_remaining(), 1);
    }
}
