//! Session store abstraction and the in-process implementation.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use crate::error::SessionError;
use crate::handle::{SessionHandle, SessionSlot};
use crate::token::SessionToken;

/// Where per-client state lives between requests.
///
/// Handlers never touch a global; they receive a [`SessionHandle`] opened
/// from whatever store the server was built with.
pub trait SessionStore: Send + Sync {
    /// Resume the session named by `presented`, or start a new one when the
    /// token is missing, malformed, unknown or expired.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if a fresh token cannot be minted.
    fn open(&self, presented: Option<&str>) -> Result<SessionHandle, SessionError>;

    /// Drop a session. Returns whether it existed.
    fn remove(&self, token: &SessionToken) -> bool;

    /// Drop every session idle for longer than the store's TTL. Returns how
    /// many were removed.
    fn purge_expired(&self) -> usize;

    /// Number of sessions currently held, expired or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sessions held in process memory, lost on restart.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionToken, Arc<SessionSlot>>>,
    idle_ttl: Duration,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    #[must_use]
    pub const fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    /// [`SessionStore::open`] against an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if a fresh token cannot be minted.
    pub fn open_at(
        &self,
        presented: Option<&str>,
        now: Instant,
    ) -> Result<SessionHandle, SessionError> {
        let presented = presented.and_then(SessionToken::parse);

        if let Some(token) = &presented {
            let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = sessions.get(token)
                && !slot.is_expired(now, self.idle_ttl)
            {
                slot.touch(now);
                return Ok(SessionHandle::new(token.clone(), Arc::clone(slot), false));
            }
        }

        let token = SessionToken::generate()?;
        let slot = Arc::new(SessionSlot::new(now));

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(stale) = &presented
            && sessions.remove(stale).is_some()
        {
            tracing::debug!(session = stale.short(), "dropped expired session");
        }
        sessions.insert(token.clone(), Arc::clone(&slot));
        drop(sessions);

        tracing::debug!(session = token.short(), "started session");
        Ok(SessionHandle::new(token, slot, true))
    }

    /// [`SessionStore::purge_expired`] against an explicit clock reading.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, slot| !slot.is_expired(now, self.idle_ttl));
        let purged = before - sessions.len();
        drop(sessions);

        if purged > 0 {
            tracing::debug!(purged, "purged expired sessions");
        }
        purged
    }
}

impl SessionStore for MemorySessionStore {
    fn open(&self, presented: Option<&str>) -> Result<SessionHandle, SessionError> {
        self.open_at(presented, Instant::now())
    }

    fn remove(&self, token: &SessionToken) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }

    fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
