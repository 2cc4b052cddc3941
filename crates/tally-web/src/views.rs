//! HTML rendering with minijinja.
//!
//! Templates are compiled into the binary. Every page extends `layout.html`,
//! which shows the flash messages; the flash passed to [`Views::render`] is
//! the one the caller took from the session, so each message renders once.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use tally_core::{EntityId, Flash, Todo, TodoList};

use crate::error::WebError;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("lists.html", include_str!("../templates/lists.html")),
    ("new_list.html", include_str!("../templates/new_list.html")),
    ("list.html", include_str!("../templates/list.html")),
    ("edit_list.html", include_str!("../templates/edit_list.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
];

pub const STYLESHEET: &str = include_str!("../assets/application.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Lists,
    NewList,
    List,
    EditList,
    NotFound,
}

impl View {
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Lists => "lists.html",
            Self::NewList => "new_list.html",
            Self::List => "list.html",
            Self::EditList => "edit_list.html",
            Self::NotFound => "not_found.html",
        }
    }
}

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListSummary {
    pub id: EntityId,
    pub name: String,
    pub total_items: usize,
    pub items_remaining: usize,
    pub is_complete: bool,
}

impl From<&TodoList> for ListSummary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id,
            name: list.name.clone(),
            total_items: list.total_items(),
            items_remaining: list.items_remaining(),
            is_complete: list.is_complete(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: EntityId,
    pub name: String,
    pub completed: bool,
}

impl From<&Todo> for TodoItem {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            name: todo.name.clone(),
            completed: todo.completed,
        }
    }
}

/// A list with its todos in display order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListDetail {
    #[serde(flatten)]
    pub summary: ListSummary,
    pub todos: Vec<TodoItem>,
}

impl From<&TodoList> for ListDetail {
    fn from(list: &TodoList) -> Self {
        Self {
            summary: ListSummary::from(list),
            todos: list.todos_for_display().map(TodoItem::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListsPage {
    pub lists: Vec<ListSummary>,
}

/// `list_name` echoes what the user typed when the form is shown again.
#[derive(Debug, Serialize)]
pub struct NewListPage {
    pub list_name: String,
}

#[derive(Debug, Serialize)]
pub struct ListPage {
    pub list: ListDetail,
    pub todo: String,
}

#[derive(Debug, Serialize)]
pub struct EditListPage {
    pub list: ListSummary,
    pub list_name: String,
}

#[derive(Debug, Serialize)]
pub struct NotFoundPage {
    pub path: String,
}

#[derive(Serialize)]
struct Rendered<'a, T: Serialize> {
    #[serde(flatten)]
    page: &'a T,
    flash: Flash,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

pub struct Views {
    env: Environment<'static>,
}

impl std::fmt::Debug for Views {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Views").finish_non_exhaustive()
    }
}

impl Views {
    /// Load every embedded template.
    ///
    /// # Errors
    ///
    /// Returns `WebError::Render` if a template fails to parse.
    pub fn new() -> Result<Self, WebError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `view` with its page model and the flash to show.
    ///
    /// # Errors
    ///
    /// Returns `WebError::Render` if rendering fails.
    pub fn render<T: Serialize>(&self, view: View, page: &T, flash: Flash) -> Result<String, WebError> {
        let template = self.env.get_template(view.template())?;
        let html = template.render(Rendered { page, flash })?;
        Ok(html)
    }
}
