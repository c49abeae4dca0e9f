//! Multi-turn triage conversation state machine.
//!
//! One `SessionState` per conversation. `start` resets everything, ranks the
//! initial symptom set, and queues follow-up questions; `answer` consumes one
//! yes/no reply at a time until the pending list is exhausted, then
//! recomputes the ranking over the full confirmed set and finalizes.
//!
//! A failed `answer` never mutates the session: the cursor only advances and
//! symptoms are only appended after the turn is known to succeed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{FINAL_TOP_N, INITIAL_TOP_N, MAX_FOLLOW_UP_QUESTIONS};
use crate::engine::index::CorpusIndex;
use crate::engine::{followup, parse_symptom_input, scorer, TriageError};
use crate::models::RankedCandidate;

/// One user reply to a follow-up question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    /// No prior question to answer — valid only on the very first
    /// `answer` call of a session, where it is a no-op.
    Absent,
}

/// Where the conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Session created (or reset) but `start` has not run yet.
    CollectingInitial,
    /// Iterating follow-up questions. The pending list may be empty, in
    /// which case the next `answer` call finalizes immediately.
    Asking,
    /// Terminal: a single disease was determined (or nothing matched).
    Finalized,
}

/// Outcome of one `answer` turn.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// Ask about this symptom term next.
    Question(String),
    /// Conversation over — the single most-likely disease.
    Final(RankedCandidate),
}

/// Per-conversation state. Held behind a per-session mutex by the store;
/// nothing here survives a process restart.
#[derive(Debug)]
pub struct SessionState {
    /// Confirmed symptoms in insertion order — later confirmations append.
    confirmed: Vec<String>,
    /// Disease names of the current top-ranked candidates.
    top_diseases: Vec<String>,
    /// Follow-up symptom terms still to ask about, fixed at `start`.
    pending: Vec<String>,
    /// Next unanswered question index. Always in `[0, pending.len()]`.
    cursor: usize,
    phase: Phase,
    started_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            confirmed: Vec::new(),
            top_diseases: Vec::new(),
            pending: Vec::new(),
            cursor: 0,
            phase: Phase::CollectingInitial,
            started_at: Utc::now(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn confirmed_symptoms(&self) -> &[String] {
        &self.confirmed
    }

    pub fn pending_questions(&self) -> &[String] {
        &self.pending
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Begin (or restart) a triage conversation from raw comma-separated
    /// symptom text. Clears all prior state, ranks the initial candidates,
    /// and queues follow-up questions bound to the top diseases.
    ///
    /// When the reported symptoms overlap with no disease at all, the
    /// session finalizes immediately with an empty ranking — the explicit
    /// "no confident match" outcome — rather than surfacing the degenerate
    /// score to the caller.
    pub fn start(
        &mut self,
        index: &CorpusIndex,
        raw_symptom_text: &str,
    ) -> Result<Vec<RankedCandidate>, TriageError> {
        let terms = parse_symptom_input(raw_symptom_text);

        self.confirmed = terms;
        self.top_diseases.clear();
        self.pending.clear();
        self.cursor = 0;
        self.phase = Phase::CollectingInitial;
        self.started_at = Utc::now();

        let candidates = match scorer::score(index, &self.confirmed, INITIAL_TOP_N) {
            Ok(candidates) => candidates,
            Err(TriageError::DegenerateScore) => {
                tracing::debug!("No disease matched the initial symptoms, finalizing empty");
                self.phase = Phase::Finalized;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        self.top_diseases = candidates.iter().map(|c| c.disease.clone()).collect();
        self.pending = followup::select_follow_ups(
            index,
            &self.confirmed,
            &self.top_diseases,
            MAX_FOLLOW_UP_QUESTIONS,
        );
        self.phase = Phase::Asking;

        tracing::debug!(
            candidates = candidates.len(),
            follow_ups = self.pending.len(),
            "Triage session started"
        );

        Ok(candidates)
    }

    /// Consume one answer and advance the conversation by a single turn.
    ///
    /// `Answer::Yes` confirms the symptom just asked about (cursor − 1);
    /// `Answer::No` leaves it out; `Answer::Absent` is only valid on the
    /// very first call, before any question was asked.
    ///
    /// # Errors
    /// `InvalidSessionState` when called before `start`, after finalization,
    /// or with an answer that does not fit the cursor position. The session
    /// is left untouched on error.
    pub fn answer(
        &mut self,
        index: &CorpusIndex,
        answer: Answer,
    ) -> Result<TurnOutcome, TriageError> {
        if self.phase != Phase::Asking {
            return Err(TriageError::InvalidSessionState);
        }

        let confirmed_now = match answer {
            Answer::Absent => {
                if self.cursor != 0 {
                    return Err(TriageError::InvalidSessionState);
                }
                None
            }
            Answer::Yes => {
                if self.cursor == 0 {
                    return Err(TriageError::InvalidSessionState);
                }
                Some(self.pending[self.cursor - 1].clone())
            }
            Answer::No => {
                if self.cursor == 0 {
                    return Err(TriageError::InvalidSessionState);
                }
                None
            }
        };

        if self.cursor < self.pending.len() {
            let question = self.pending[self.cursor].clone();
            // Commit only after the turn is known to succeed.
            if let Some(symptom) = confirmed_now {
                self.confirmed.push(symptom);
            }
            self.cursor += 1;
            return Ok(TurnOutcome::Question(question));
        }

        // All questions answered: recompute over the full confirmed set.
        let mut symptoms = self.confirmed.clone();
        if let Some(symptom) = confirmed_now {
            symptoms.push(symptom);
        }
        let ranked = scorer::score(index, &symptoms, FINAL_TOP_N)?;
        let top = ranked
            .into_iter()
            .next()
            .ok_or(TriageError::DegenerateScore)?;

        self.confirmed = symptoms;
        self.phase = Phase::Finalized;

        tracing::debug!(
            disease = %top.disease,
            probability = top.probability,
            "Triage session finalized"
        );

        Ok(TurnOutcome::Final(top))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
