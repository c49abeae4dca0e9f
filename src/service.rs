//! The surface consumed by the HTTP layer.
//!
//! `TriageService` ties the shared corpus index to the session store and
//! translates engine types into frontend-facing payloads: probabilities
//! become one-decimal percentage strings, follow-up symptoms become question
//! text. All methods are synchronous; per-session turns serialize on the
//! session's own mutex.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::index::CorpusIndex;
use crate::engine::session::{Answer, TurnOutcome};
use crate::engine::store::SessionStore;
use crate::engine::TriageError;
use crate::enrichment::{DetailEnricher, DiseaseDetails};
use crate::models::RankedCandidate;

// ═══════════════════════════════════════════
// Frontend-facing types
// ═══════════════════════════════════════════

/// One ranked disease as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateView {
    pub disease: String,
    /// One-decimal percentage string, e.g. `"42.7%"`.
    pub probability: String,
}

/// Reply to one answered turn: either the next question or the diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnReply {
    Question { question: String },
    Final { final_disease: String, probability: String },
}

// ═══════════════════════════════════════════
// TriageService
// ═══════════════════════════════════════════

pub struct TriageService {
    index: Arc<CorpusIndex>,
    sessions: SessionStore,
    enricher: Option<DetailEnricher>,
}

impl TriageService {
    pub fn new(index: Arc<CorpusIndex>, sessions: SessionStore) -> Self {
        Self {
            index,
            sessions,
            enricher: None,
        }
    }

    /// Attach a detail enricher for finalized diagnoses.
    pub fn with_enricher(mut self, enricher: DetailEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    /// Start (or restart) the triage conversation for `session_key` from
    /// free-text symptoms. Returns the initial ranking; an empty list means
    /// nothing matched and the conversation is already over.
    pub fn submit_symptoms(
        &self,
        session_key: Uuid,
        free_text: &str,
    ) -> Result<Vec<CandidateView>, TriageError> {
        tracing::debug!(session = %session_key, "Symptom submission");

        let session = self.sessions.obtain(session_key)?;
        let mut state = session.lock().map_err(|_| TriageError::LockPoisoned)?;
        let candidates = state.start(&self.index, free_text)?;

        Ok(candidates.iter().map(candidate_view).collect())
    }

    /// Submit one answer for `session_key` and get either the next question
    /// or the final diagnosis.
    pub fn submit_answer(
        &self,
        session_key: Uuid,
        answer: Answer,
    ) -> Result<TurnReply, TriageError> {
        let session = self.sessions.get(session_key)?;
        let mut state = session.lock().map_err(|_| TriageError::LockPoisoned)?;

        match state.answer(&self.index, answer)? {
            TurnOutcome::Question(symptom) => Ok(TurnReply::Question {
                question: format!("Do you have {symptom}?"),
            }),
            TurnOutcome::Final(candidate) => Ok(TurnReply::Final {
                final_disease: candidate.disease,
                probability: format_percent(candidate.probability),
            }),
        }
    }

    /// Advice record for a diagnosed disease, when an enricher is attached.
    pub fn details_for(&self, disease: &str) -> Option<DiseaseDetails> {
        self.enricher.as_ref().map(|e| e.details_for(disease))
    }

    /// Discard a finished session.
    pub fn end_session(&self, session_key: Uuid) -> Result<bool, TriageError> {
        self.sessions.remove(session_key)
    }
}

fn candidate_view(candidate: &RankedCandidate) -> CandidateView {
    CandidateView {
        disease: candidate.disease.clone(),
        probability: format_percent(candidate.probability),
    }
}

/// Format a probability as a percentage with one decimal place.
fn format_percent(probability: f32) -> String {
    format!("{:.1}%", probability * 100.0)
}
