//! # tally-session
//!
//! Per-client session storage for Tally.
//!
//! A client is identified by an opaque [`SessionToken`] carried in a cookie.
//! Each request opens a [`SessionHandle`] from a [`SessionStore`] and does all
//! of its reading and writing through [`SessionHandle::with_state`], which
//! serializes access per session. Sessions idle longer than the store's TTL
//! are discarded.

mod error;
mod handle;
mod store;
mod token;

pub use error::SessionError;
pub use handle::{SessionHandle, SessionSlot};
pub use store::{MemorySessionStore, SessionStore};
pub use token::SessionToken;
