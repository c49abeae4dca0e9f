//! Session-keyed state store.
//!
//! Replaces the single process-wide conversation slot with an explicit map
//! from session key to state, so independent users can triage concurrently.
//! The map itself sits behind an `RwLock`; each session sits behind its own
//! `Mutex`, serializing turns per conversation — two answers racing on the
//! same key queue on that mutex instead of interleaving.
//!
//! Everything here is in-memory only. Nothing survives a process restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use uuid::Uuid;

use crate::engine::session::SessionState;
use crate::engine::TriageError;

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<SessionState>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get the session for `key`, creating a fresh one if absent.
    ///
    /// Used by symptom submission, which resets the session anyway.
    pub fn obtain(&self, key: Uuid) -> Result<Arc<Mutex<SessionState>>, TriageError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TriageError::LockPoisoned)?;
        Ok(Arc::clone(
            sessions
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(SessionState::new()))),
        ))
    }

    /// Get an existing session or fail.
    ///
    /// Used by answer submission, which must not invent sessions.
    pub fn get(&self, key: Uuid) -> Result<Arc<Mutex<SessionState>>, TriageError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| TriageError::LockPoisoned)?;
        sessions
            .get(&key)
            .cloned()
            .ok_or(TriageError::SessionNotFound(key))
    }

    /// Discard a session. Returns false when the key was unknown.
    pub fn remove(&self, key: Uuid) -> Result<bool, TriageError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| TriageError::LockPoisoned)?;
        Ok(sessions.remove(&key).is_some())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
