//! Transport-independent request and response types.
//!
//! The server converts `tiny_http` requests into these before dispatch, which
//! keeps every handler testable without a socket.

use std::borrow::Cow;
use std::fmt;

use crate::cookie;
use crate::form::Form;

pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const NO_CONTENT: u16 = 204;
    pub const SEE_OTHER: u16 = 303;
    pub const NOT_FOUND: u16 = 404;
    pub const METHOD_NOT_ALLOWED: u16 = 405;
    pub const PAYLOAD_TOO_LARGE: u16 = 413;
    pub const UNPROCESSABLE_ENTITY: u16 = 422;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
}

const HTML: &str = "text/html; charset=utf-8";
const PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Other(String),
}

impl Method {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "HEAD" => Self::Head,
            "POST" => Self::Post,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Other(other) => other.as_str(),
        }
    }

    /// HEAD is routed like GET; the server drops the body.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path without the query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Build a request from a method and a request target (`/path?query`).
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let path = target.split_once('?').map_or(target, |(path, _)| path);
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(target: &str) -> Self {
        Self::new(Method::Get, target)
    }

    /// A form post with an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn post(target: &str, form_body: &str) -> Self {
        Self::new(Method::Post, target)
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(form_body.as_bytes().to_vec())
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// First header named `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case("cookie"))
            .find_map(|(_, value)| cookie::find(value, name))
    }

    /// Requests issued by client-side script identify themselves this way.
    #[must_use]
    pub fn is_xhr(&self) -> bool {
        self.header("X-Requested-With")
            .is_some_and(|value| value.eq_ignore_ascii_case("XMLHttpRequest"))
    }

    #[must_use]
    pub fn form(&self) -> Form {
        Form::parse(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub const fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn html(status: u16, body: String) -> Self {
        Self::new(status)
            .with_header("Content-Type", HTML)
            .with_body(body.into_bytes())
    }

    #[must_use]
    pub fn text(status: u16, body: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", PLAIN)
            .with_body(body.as_bytes().to_vec())
    }

    /// `303 See Other`, so the browser follows with a GET.
    #[must_use]
    pub fn redirect(location: &str) -> Self {
        Self::new(status::SEE_OTHER).with_header("Location", location)
    }

    #[must_use]
    pub const fn no_content() -> Self {
        Self::new(status::NO_CONTENT)
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
