//! Cookie-carrying test client over `App::handle`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tally_core::{EntityId, SessionState};
use tally_session::{MemorySessionStore, SessionStore};
use tally_web::{App, AppOptions, Request, Response};

pub const COOKIE: &str = "sid";

pub struct Client {
    app: Arc<App>,
    cookie: Option<String>,
}

pub fn app(max_body_bytes: usize) -> Arc<App> {
    let store = Arc::new(MemorySessionStore::new(Duration::from_secs(60)));
    let options = AppOptions {
        cookie_name: COOKIE.to_string(),
        max_body_bytes,
    };
    Arc::new(App::new(store, options).expect("templates parse"))
}

impl Client {
    pub fn new() -> Self {
        Self::with_app(app(16 * 1024))
    }

    pub fn with_app(app: Arc<App>) -> Self {
        Self { app, cookie: None }
    }

    pub fn send(&mut self, request: Request) -> Response {
        let request = match &self.cookie {
            Some(cookie) => request.with_header("Cookie", cookie),
            None => request,
        };
        let response = self.app.handle(&request);
        if let Some(set) = response.header("Set-Cookie") {
            self.cookie = set.split(';').next().map(str::to_string);
        }
        response
    }

    pub fn get(&mut self, path: &str) -> Response {
        self.send(Request::get(path))
    }

    pub fn post(&mut self, path: &str, body: &str) -> Response {
        self.send(Request::post(path, body))
    }

    pub fn xhr_post(&mut self, path: &str) -> Response {
        self.send(Request::post(path, "").with_header("X-Requested-With", "XMLHttpRequest"))
    }

    /// Number of live sessions in the app's store.
    pub fn sessions(&self) -> usize {
        self.app.store().len()
    }

    /// Current session state, read without consuming flash.
    pub fn state(&self) -> SessionState {
        let token = self
            .cookie
            .as_deref()
            .and_then(|cookie| cookie.split_once('='))
            .map(|(_, token)| token)
            .expect("client has a session cookie");
        self.app
            .store()
            .open(Some(token))
            .expect("session opens")
            .snapshot()
    }

    /// Create a list and return its id.
    pub fn create_list(&mut self, name: &str) -> EntityId {
        let response = self.post("/lists", &format!("list_name={name}"));
        assert_eq!(response.status, 303, "creating list {name}");
        self.state()
            .lists
            .iter()
            .find(|list| list.name == name.replace('+', " "))
            .map(|list| list.id)
            .expect("list was stored")
    }

    /// Add a todo and return its id.
    pub fn add_todo(&mut self, list: EntityId, name: &str) -> EntityId {
        let response = self.post(&format!("/lists/{list}/todos"), &format!("todo={name}"));
        assert_eq!(response.status, 303, "adding todo {name}");
        self.state()
            .list(list)
            .expect("list exists")
            .todos
            .last()
            .map(|todo| todo.id)
            .expect("todo was stored")
    }
}

pub fn location(response: &Response) -> &str {
    response.header("Location").expect("redirect has Location")
}
