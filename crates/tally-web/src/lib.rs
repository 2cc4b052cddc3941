//! # tally-web
//!
//! The HTTP surface of Tally.
//!
//! - [`http`]: transport-independent request/response types
//! - [`router`]: method + path to [`router::Route`]
//! - [`handlers`]: one function per route, all running under the session lock
//! - [`views`]: minijinja templates compiled into the binary
//! - [`app::App`]: session resolution, dispatch, error mapping, request logging
//! - [`server::Server`]: the `tiny_http` listener and worker loop
//!
//! Tests drive [`App::handle`] directly; only the server smoke test opens a
//! socket.

pub mod app;
pub mod cookie;
pub mod error;
pub mod form;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod views;

pub use app::{App, AppOptions};
pub use error::WebError;
pub use http::{Method, Request, Response};
pub use server::Server;
