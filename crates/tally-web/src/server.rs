//! `tiny_http` listener and worker loop.
//!
//! Workers are plain blocking loops over `incoming_requests`; the caller
//! decides how many to run and on which threads. [`Server::unblock`] wakes
//! one blocked worker so it can observe shutdown and return.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::app::App;
use crate::error::WebError;
use crate::http::{Method, Request, Response, status};

pub struct Server {
    http: tiny_http::Server,
    app: Arc<App>,
    max_body_bytes: usize,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("addr", &self.local_addr())
            .field("max_body_bytes", &self.max_body_bytes)
            .finish_non_exhaustive()
    }
}

impl Server {
    /// Bind the listener. Use port `0` to let the OS pick one.
    ///
    /// # Errors
    ///
    /// Returns `WebError::Bind` if the address is unavailable.
    pub fn bind(addr: &str, app: Arc<App>, max_body_bytes: usize) -> Result<Self, WebError> {
        let http = tiny_http::Server::http(addr).map_err(|e| WebError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            http,
            app,
            max_body_bytes,
        })
    }

    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http.server_addr().to_ip()
    }

    /// Serve requests until [`Self::unblock`] is called for this worker.
    pub fn run_worker(&self) {
        for mut incoming in self.http.incoming_requests() {
            let response = match read_request(&mut incoming, self.max_body_bytes) {
                Ok(request) => self.app.handle(&request),
                Err(error) => {
                    tracing::warn!(%error, "failed to read request");
                    Response::text(status::BAD_REQUEST, "Bad Request")
                }
            };

            if let Err(error) = incoming.respond(to_tiny(response)) {
                tracing::debug!(%error, "client disconnected before response was sent");
            }
        }
    }

    /// Wake one worker blocked in [`Self::run_worker`] so it returns.
    pub fn unblock(&self) {
        self.http.unblock();
    }
}

/// Reads at most one byte past the limit so the app can tell an oversized
/// body from one that fits exactly.
fn read_request(incoming: &mut tiny_http::Request, max_body_bytes: usize) -> Result<Request, WebError> {
    let method = Method::parse(incoming.method().as_str());
    let mut request = Request::new(method, incoming.url());
    request.headers = incoming
        .headers()
        .iter()
        .map(|header| {
            (
                header.field.as_str().as_str().to_string(),
                header.value.as_str().to_string(),
            )
        })
        .collect();

    let limit = u64::try_from(max_body_bytes)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut body = Vec::new();
    incoming.as_reader().take(limit).read_to_end(&mut body)?;
    request.body = body;
    Ok(request)
}

fn to_tiny(response: Response) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut out =
        tiny_http::Response::from_data(response.body).with_status_code(response.status);
    for (name, value) in &response.headers {
        match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => out.add_header(header),
            Err(()) => tracing::warn!(header = %name, "dropping header that is not valid ASCII"),
        }
    }
    out
}
