//! Refresh session registry.
//!
//! Each live refresh token id maps to an immutable [`RefreshEntry`]. An id leaves
//! the registry exactly once: when it is redeemed (matching or not), when it is
//! pruned after expiry, or when its session is revoked. After that it cannot be
//! told apart from an id that was never registered.

use crate::error::{Error, Result};
use crate::token::Role;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshEntry {
    pub user_id: String,
    pub role: Role,
    pub session_id: String,
    pub expires_at: i64,
}

/// Outcome of [`RefreshStore::redeem`]. `Mismatch` and `Absent` both leave the
/// id unregistered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    Found(RefreshEntry),
    Mismatch,
    Absent,
}

/// Server-side truth about which refresh tokens may still be redeemed.
///
/// Implementations must make `redeem` atomic per token id: two concurrent calls
/// for one id never both return [`Redemption::Found`].
pub trait RefreshStore: Send + Sync + fmt::Debug {
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTokenId`] if `token_id` is already live.
    fn register(&self, token_id: &str, entry: RefreshEntry) -> Result<()>;

    /// Look up and remove `token_id` in one step.
    fn redeem(&self, token_id: &str, user_id: &str, session_id: &str) -> Redemption;

    /// Remove every entry with `expires_at <= now_unix_seconds`; returns how many.
    fn prune(&self, now_unix_seconds: i64) -> usize;

    /// Remove every entry of `session_id`; returns how many.
    fn revoke_session(&self, session_id: &str) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local registry. Lost on restart and not shared between instances.
#[derive(Debug, Default)]
pub struct MemoryRefreshStore {
    entries: Mutex<HashMap<String, RefreshEntry>>,
}

impl MemoryRefreshStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are never mutated in place, so a poisoned map is still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, RefreshEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RefreshStore for MemoryRefreshStore {
    fn register(&self, token_id: &str, entry: RefreshEntry) -> Result<()> {
        let mut entries = self.entries();
        if entries.contains_key(token_id) {
            return Err(Error::DuplicateTokenId(token_id.to_string()));
        }
        entries.insert(token_id.to_string(), entry);
        Ok(())
    }

    fn redeem(&self, token_id: &str, user_id: &str, session_id: &str) -> Redemption {
        let Some(entry) = self.entries().remove(token_id) else {
            return Redemption::Absent;
        };
        if entry.user_id == user_id && entry.session_id == session_id {
            Redemption::Found(entry)
        } else {
            Redemption::Mismatch
        }
    }

    fn prune(&self, now_unix_seconds: i64) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now_unix_seconds);
        before - entries.len()
    }

    fn revoke_session(&self, session_id: &str) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.session_id != session_id);
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries().len()
    }
}
