//! Disease detail enrichment — the external generative-text collaborator.
//!
//! Supplies human-facing advice text (prevention tips, home remedies, which
//! specialist to see, a risk level) for a finalized diagnosis. The backend is
//! a pluggable `TextGenerate` implementation; failures and malformed output
//! are always masked by a fixed fallback record and never reach the end user.

pub mod client;
pub mod enricher;
pub mod parser;
pub mod types;

use thiserror::Error;

pub use client::{GenerativeClient, TextGenerate};
pub use enricher::DetailEnricher;
pub use types::{DiseaseDetails, RiskLevel};

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("Cannot reach generative service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Generative service returned HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
