//! One function per route.
//!
//! Every session-backed handler runs inside [`SessionHandle::with_state`], so
//! the whole read-validate-mutate-respond cycle of a request holds the
//! session lock.
//! Writes answer with a redirect on success. A rejected name re-renders the
//! originating form with status 422 and the typed input echoed back. An
//! unknown id flashes an error and redirects to the nearest existing page.

use tally_core::{CoreError, EntityId, EntityKind, Flash, SessionState, messages, parse_completed};
use tally_session::SessionHandle;

use crate::error::WebError;
use crate::form::Form;
use crate::http::{Response, status};
use crate::views::{
    EditListPage, ListDetail, ListPage, ListSummary, ListsPage, NewListPage, NotFoundPage, View,
    Views,
};

/// What a handler gets to work with for one request.
pub struct Context<'a> {
    pub views: &'a Views,
    pub session: &'a SessionHandle,
    pub xhr: bool,
    /// HEAD renders like GET but the body is discarded, so the flash is
    /// shown without being consumed.
    pub head: bool,
}

fn list_path(list: EntityId) -> String {
    format!("/lists/{list}")
}

fn page<T: serde::Serialize>(
    cx: &Context<'_>,
    state: &mut SessionState,
    view: View,
    model: &T,
    code: u16,
) -> Result<Response, WebError> {
    let flash = if cx.head {
        state.peek_flash()
    } else {
        state.take_flash()
    };
    let html = cx.views.render(view, model, flash)?;
    Ok(Response::html(code, html))
}

/// Turn a failed lookup into an error flash and a redirect; anything else is
/// passed through.
fn recover(state: &mut SessionState, error: CoreError, list: EntityId) -> Result<Response, WebError> {
    match error {
        CoreError::NotFound {
            entity: EntityKind::List,
            ..
        } => {
            tracing::debug!(list, "list not found");
            state.set_error(messages::LIST_NOT_FOUND);
            Ok(Response::redirect("/lists"))
        }
        CoreError::NotFound {
            entity: EntityKind::Todo,
            id,
        } => {
            tracing::debug!(list, todo = id, "todo not found");
            state.set_error(messages::TODO_NOT_FOUND);
            Ok(Response::redirect(&list_path(list)))
        }
        CoreError::Validation(_) => Err(error.into()),
    }
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

pub fn root() -> Response {
    Response::redirect("/lists")
}

pub fn stylesheet() -> Response {
    Response::new(status::OK)
        .with_header("Content-Type", "text/css; charset=utf-8")
        .with_body(crate::views::STYLESHEET.as_bytes().to_vec())
}

/// Rendered without a session, so unknown paths never mint one and never
/// consume a pending flash.
pub fn not_found(views: &Views, path: &str) -> Result<Response, WebError> {
    let model = NotFoundPage {
        path: path.to_string(),
    };
    let html = views.render(View::NotFound, &model, Flash::default())?;
    Ok(Response::html(status::NOT_FOUND, html))
}

pub fn lists(cx: &Context<'_>) -> Result<Response, WebError> {
    cx.session.with_state(|state| {
        let model = ListsPage {
            lists: state.lists_for_display().map(ListSummary::from).collect(),
        };
        page(cx, state, View::Lists, &model, status::OK)
    })
}

pub fn new_list(cx: &Context<'_>) -> Result<Response, WebError> {
    cx.session.with_state(|state| {
        let model = NewListPage {
            list_name: String::new(),
        };
        page(cx, state, View::NewList, &model, status::OK)
    })
}

pub fn show_list(cx: &Context<'_>, list: EntityId) -> Result<Response, WebError> {
    cx.session.with_state(|state| {
        let detail = match state.list(list) {
            Ok(found) => ListDetail::from(found),
            Err(error) => return recover(state, error, list),
        };
        let model = ListPage {
            list: detail,
            todo: String::new(),
        };
        page(cx, state, View::List, &model, status::OK)
    })
}

pub fn edit_list(cx: &Context<'_>, list: EntityId) -> Result<Response, WebError> {
    cx.session.with_state(|state| {
        let summary = match state.list(list) {
            Ok(found) => ListSummary::from(found),
            Err(error) => return recover(state, error, list),
        };
        let model = EditListPage {
            list_name: summary.name.clone(),
            list: summary,
        };
        page(cx, state, View::EditList, &model, status::OK)
    })
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

pub fn create_list(cx: &Context<'_>, form: &Form) -> Result<Response, WebError> {
    let name = form.get("list_name");
    cx.session.with_state(|state| match state.create_list(name) {
        Ok(id) => {
            tracing::debug!(list = id, "created list");
            Ok(Response::redirect("/lists"))
        }
        Err(CoreError::Validation(rejected)) => {
            tracing::debug!(reason = %rejected, "rejected list name");
            state.set_error(rejected.to_string());
            let model = NewListPage {
                list_name: name.trim().to_string(),
            };
            page(cx, state, View::NewList, &model, status::UNPROCESSABLE_ENTITY)
        }
        Err(error) => Err(error.into()),
    })
}

pub fn update_list(cx: &Context<'_>, list: EntityId, form: &Form) -> Result<Response, WebError> {
    let name = form.get("list_name");
    cx.session.with_state(|state| match state.rename_list(list, name) {
        Ok(()) => {
            tracing::debug!(list, "renamed list");
            Ok(Response::redirect(&list_path(list)))
        }
        Err(CoreError::Validation(rejected)) => {
            tracing::debug!(list, reason = %rejected, "rejected list rename");
            state.set_error(rejected.to_string());
            let summary = ListSummary::from(state.list(list)?);
            let model = EditListPage {
                list: summary,
                list_name: name.trim().to_string(),
            };
            page(cx, state, View::EditList, &model, status::UNPROCESSABLE_ENTITY)
        }
        Err(error) => recover(state, error, list),
    })
}

pub fn delete_list(cx: &Context<'_>, list: EntityId) -> Result<Response, WebError> {
    cx.session.with_state(|state| match state.delete_list(list) {
        Ok(removed) => {
            tracing::debug!(list, todos = removed.total_items(), "deleted list");
            if cx.xhr {
                Ok(Response::text(status::OK, "/lists"))
            } else {
                Ok(Response::redirect("/lists"))
            }
        }
        Err(error) => recover(state, error, list),
    })
}

pub fn create_todo(cx: &Context<'_>, list: EntityId, form: &Form) -> Result<Response, WebError> {
    let text = form.get("todo");
    cx.session.with_state(|state| match state.add_todo(list, text) {
        Ok(todo) => {
            tracing::debug!(list, todo, "added todo");
            Ok(Response::redirect(&list_path(list)))
        }
        Err(CoreError::Validation(rejected)) => {
            tracing::debug!(list, reason = %rejected, "rejected todo");
            state.set_error(rejected.to_string());
            let detail = ListDetail::from(state.list(list)?);
            let model = ListPage {
                list: detail,
                todo: text.trim().to_string(),
            };
            page(cx, state, View::List, &model, status::UNPROCESSABLE_ENTITY)
        }
        Err(error) => recover(state, error, list),
    })
}

pub fn delete_todo(cx: &Context<'_>, list: EntityId, todo: EntityId) -> Result<Response, WebError> {
    cx.session.with_state(|state| match state.delete_todo(list, todo) {
        Ok(_) => {
            tracing::debug!(list, todo, "deleted todo");
            if cx.xhr {
                Ok(Response::no_content())
            } else {
                Ok(Response::redirect(&list_path(list)))
            }
        }
        Err(error) => recover(state, error, list),
    })
}

pub fn toggle_todo(
    cx: &Context<'_>,
    list: EntityId,
    todo: EntityId,
    form: &Form,
) -> Result<Response, WebError> {
    let completed = parse_completed(form.get("completed"));
    cx.session
        .with_state(|state| match state.set_todo_completed(list, todo, completed) {
            Ok(()) => {
                tracing::debug!(list, todo, completed, "toggled todo");
                Ok(Response::redirect(&list_path(list)))
            }
            Err(error) => recover(state, error, list),
        })
}

pub fn complete_all(cx: &Context<'_>, list: EntityId) -> Result<Response, WebError> {
    cx.session.with_state(|state| match state.complete_all(list) {
        Ok(()) => {
            tracing::debug!(list, "completed all todos");
            Ok(Response::redirect(&list_path(list)))
        }
        Err(error) => recover(state, error, list),
    })
}
