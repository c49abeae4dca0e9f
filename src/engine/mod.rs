//! Symptom-matching and adaptive-questioning engine.
//!
//! - `index` — frozen TF-IDF model over the disease dataset
//! - `scorer` — cosine ranking with rarity penalty
//! - `followup` — which unconfirmed symptoms to ask about next
//! - `session` — the multi-turn conversation state machine
//! - `store` — session-keyed state with per-key serialization

pub mod followup;
pub mod index;
pub mod scorer;
pub mod session;
pub mod store;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TriageError {
    /// All adjusted scores are zero — the reported symptoms overlap with no
    /// disease at all. Recoverable; the caller picks the fallback
    /// presentation.
    #[error("No symptom overlap with any disease")]
    DegenerateScore,

    /// Answer received before a session was started, after finalization, or
    /// out of order for the current cursor.
    #[error("Answer received out of order for the current session")]
    InvalidSessionState,

    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Internal lock error")]
    LockPoisoned,
}

/// Normalize one symptom term: trim surrounding whitespace, lowercase.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse comma-separated free text into an ordered, de-duplicated set of
/// normalized symptom terms. Empty fragments are dropped, so `""` and
/// `"  ,  "` both yield an empty set.
pub fn parse_symptom_input(raw: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for fragment in raw.split(',') {
        let term = normalize_term(fragment);
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}
