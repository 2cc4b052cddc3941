//! Request dispatch: session resolution, routing, error mapping and logging.

use std::sync::Arc;
use std::time::Instant;

use tally_config::TallyConfig;
use tally_session::{MemorySessionStore, SessionHandle, SessionStore};

use crate::cookie;
use crate::error::WebError;
use crate::handlers::{self, Context};
use crate::http::{Method, Request, Response, status};
use crate::router::{self, Route, RouteMatch};
use crate::views::Views;

/// Settings the dispatcher needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub cookie_name: String,
    pub max_body_bytes: usize,
}

impl From<&TallyConfig> for AppOptions {
    fn from(config: &TallyConfig) -> Self {
        Self {
            cookie_name: config.session.cookie_name.clone(),
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}

/// The whole application behind a transport-independent `handle`.
pub struct App {
    store: Arc<dyn SessionStore>,
    views: Views,
    options: AppOptions,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("sessions", &self.store.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl App {
    /// # Errors
    ///
    /// Returns `WebError::Render` if the embedded templates fail to parse.
    pub fn new(store: Arc<dyn SessionStore>, options: AppOptions) -> Result<Self, WebError> {
        Ok(Self {
            store,
            views: Views::new()?,
            options,
        })
    }

    /// Build an app with an in-memory store sized from configuration.
    ///
    /// # Errors
    ///
    /// Returns `WebError::Render` if the embedded templates fail to parse.
    pub fn from_config(config: &TallyConfig) -> Result<Self, WebError> {
        let store = Arc::new(MemorySessionStore::new(config.session.idle_ttl()));
        Self::new(store, AppOptions::from(config))
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Handle one request to completion. Never panics on bad input; every
    /// failure becomes an error response.
    pub fn handle(&self, request: &Request) -> Response {
        let started = Instant::now();
        let mut response = self.respond(request).unwrap_or_else(|error| {
            let code = error.status();
            if code >= status::INTERNAL_SERVER_ERROR {
                tracing::error!(%error, path = %request.path, "request failed");
            } else {
                tracing::debug!(%error, path = %request.path, "request rejected");
            }
            Response::text(code, &error.to_string())
        });

        if request.method == Method::Head {
            response.body.clear();
        }

        tracing::info!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            elapsed_ms = started.elapsed().as_millis(),
            "handled request"
        );
        response
    }

    fn respond(&self, request: &Request) -> Result<Response, WebError> {
        if request.body.len() > self.options.max_body_bytes {
            return Err(WebError::BodyTooLarge {
                limit: self.options.max_body_bytes,
            });
        }

        let route = match router::resolve(&request.method, &request.path) {
            RouteMatch::Found(route) => route,
            RouteMatch::MethodNotAllowed(allow) => {
                return Ok(Response::text(status::METHOD_NOT_ALLOWED, "Method Not Allowed")
                    .with_header("Allow", allow));
            }
            RouteMatch::NotFound => return handlers::not_found(&self.views, &request.path),
        };

        // These never touch session state and must not mint a session.
        let session = match route {
            Route::Root => return Ok(handlers::root()),
            Route::Stylesheet => return Ok(handlers::stylesheet()),
            _ => self.open_session(request)?,
        };
        let cx = self.context(request, &session);
        let form = request.form();

        let response = match route {
            Route::Root | Route::Stylesheet => {
                unreachable!("sessionless routes are answered above")
            }
            Route::Lists => handlers::lists(&cx)?,
            Route::NewList => handlers::new_list(&cx)?,
            Route::CreateList => handlers::create_list(&cx, &form)?,
            Route::ShowList { list } => handlers::show_list(&cx, list)?,
            Route::EditList { list } => handlers::edit_list(&cx, list)?,
            Route::UpdateList { list } => handlers::update_list(&cx, list, &form)?,
            Route::DeleteList { list } => handlers::delete_list(&cx, list)?,
            Route::CreateTodo { list } => handlers::create_todo(&cx, list, &form)?,
            Route::DeleteTodo { list, todo } => handlers::delete_todo(&cx, list, todo)?,
            Route::ToggleTodo { list, todo } => handlers::toggle_todo(&cx, list, todo, &form)?,
            Route::CompleteAll { list } => handlers::complete_all(&cx, list)?,
        };

        Ok(self.with_cookie(response, &session))
    }

    fn open_session(&self, request: &Request) -> Result<SessionHandle, WebError> {
        let presented = request.cookie(&self.options.cookie_name);
        Ok(self.store.open(presented)?)
    }

    fn context<'a>(&'a self, request: &Request, session: &'a SessionHandle) -> Context<'a> {
        Context {
            views: &self.views,
            session,
            xhr: request.is_xhr(),
            head: request.method == Method::Head,
        }
    }

    fn with_cookie(&self, response: Response, session: &SessionHandle) -> Response {
        if session.is_new() {
            let value = cookie::session(&self.options.cookie_name, session.token().as_str());
            response.with_header("Set-Cookie", &value)
        } else {
            response
        }
    }
}
