use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tally_core::SessionState;

use crate::token::SessionToken;

/// Storage cell for one session: its state behind a mutex plus the time it
/// was last opened.
#[derive(Debug)]
pub struct SessionSlot {
    state: Mutex<SessionState>,
    last_seen: Mutex<Instant>,
}

impl SessionSlot {
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            last_seen: Mutex::new(now),
        }
    }

    pub fn touch(&self, now: Instant) {
        *self
            .last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = now;
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant, idle_ttl: Duration) -> bool {
        let last_seen = *self
            .last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        now.saturating_duration_since(last_seen) > idle_ttl
    }
}

/// A request's capability to read and mutate exactly one session.
///
/// Handles are cheap to clone; every clone refers to the same slot.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    token: SessionToken,
    slot: Arc<SessionSlot>,
    is_new: bool,
}

impl SessionHandle {
    #[must_use]
    pub const fn new(token: SessionToken, slot: Arc<SessionSlot>, is_new: bool) -> Self {
        Self {
            token,
            slot,
            is_new,
        }
    }

    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// True when this request minted the session, so the client still needs
    /// the cookie.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.is_new
    }

    /// Run `f` with exclusive access to the session state.
    ///
    /// Concurrent requests on the same session queue here, so a double submit
    /// applies twice in order instead of losing one update. A lock poisoned by
    /// a panicking request is recovered; the state it left behind is kept.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut guard = self.slot.state.lock().unwrap_or_else(|poisoned| {
            tracing::warn!(session = self.token.short(), "recovering poisoned session lock");
            poisoned.into_inner()
        });
        f(&mut guard)
    }

    /// Clone of the current state, for inspection.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.with_state(|state| state.clone())
    }
}
