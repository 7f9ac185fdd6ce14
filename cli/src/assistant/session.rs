//! # Session Ledger
//!
//! File: cli/src/assistant/session.rs
//!
//! ## Overview
//!
//! Tracks, per user identifier, the remembered name, the number of turns so
//! far and whether the assistant is waiting for the user to say their name.
//!
//! ## Architecture
//!
//! - `SessionStore`: get/put/delete storage interface. `InMemorySessionStore`
//!   keeps sessions for the lifetime of the process; other backends can be
//!   injected without touching the assistant.
//! - `SessionLedger`: wraps a store with per-user turn locks. A turn holds its
//!   user's lock from the first read to the final write, so two concurrent
//!   turns for the same user cannot lose a count update, while different users
//!   never wait on each other.
//!
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-user conversation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    pub user_id: String,
    /// Empty until the user has told us their name.
    pub name: String,
    pub conversation_count: u64,
    pub awaiting_name: bool,
}

impl UserSession {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Self::default()
        }
    }

    pub fn known_name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }

    /// Counts a new turn and returns the updated count.
    pub fn advance_turn(&mut self) -> u64 {
        self.conversation_count += 1;
        self.conversation_count
    }

    /// Stores the title-cased name and stops waiting for one.
    pub fn set_name(&mut self, raw: &str) {
        self.name = title_case(raw.trim());
        self.awaiting_name = false;
    }
}

/// Uppercases the first letter of every word and lowercases the rest.
///
/// A "word" starts after any non-alphabetic character, so `mary-jane o'neil`
/// becomes `Mary-Jane O'Neil`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Storage for user sessions.
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: &str) -> Option<UserSession>;
    fn put(&self, session: UserSession);
    fn delete(&self, user_id: &str) -> Option<UserSession>;
}

/// Process-lifetime session storage.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, UserSession>>,
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: &str) -> Option<UserSession> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
    }

    fn put(&self, session: UserSession) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.user_id.clone(), session);
    }

    fn delete(&self, user_id: &str) -> Option<UserSession> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user_id)
    }
}

/// Session store plus per-user serialization of turns.
pub struct SessionLedger {
    store: Arc<dyn SessionStore>,
    turn_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SessionLedger {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySessionStore::default()))
    }

    /// Waits until no other turn for `user_id` is in progress.
    ///
    /// Keep the returned guard alive for the whole turn.
    pub async fn lock_user(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .turn_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id.to_string())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    pub fn get_or_create(&self, user_id: &str) -> UserSession {
        self.store
            .get(user_id)
            .unwrap_or_else(|| UserSession::new(user_id))
    }

    pub fn save(&self, session: UserSession) {
        self.store.put(session);
    }

    pub fn forget(&self, user_id: &str) -> Option<UserSession> {
        self.store.delete(user_id)
    }
}
