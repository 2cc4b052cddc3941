//! Web layer error types.

use tally_core::CoreError;
use tally_session::SessionError;
use thiserror::Error;

use crate::http::status;

#[derive(Debug, Error)]
pub enum WebError {
    /// A template failed to load or render.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),

    /// The listener could not be started.
    #[error("failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error(transparent)]
    Session(#[from] SessionError),

    /// A state error the handler had no recovery for.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl WebError {
    /// HTTP status used when this error ends a request.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::BodyTooLarge { .. } => status::PAYLOAD_TOO_LARGE,
            Self::Render(_) | Self::Bind { .. } | Self::Io(_) | Self::Session(_) | Self::Core(_) => {
                status::INTERNAL_SERVER_ERROR
            }
        }
    }
}
