//! Lenient parsing of the generative service's JSON reply.
//!
//! Models sometimes wrap their output in markdown code fences or prepend a
//! `json` language tag despite being told not to. Strip that accidental
//! formatting, then require the exact keys the prompt asks for:
//! `prevention`, `remedies`, `specialist`, `risk`.

use serde::Deserialize;

use super::types::{DiseaseDetails, RiskLevel};
use super::EnrichmentError;

/// Parse the raw model output into `DiseaseDetails`.
pub fn parse_details(response: &str) -> Result<DiseaseDetails, EnrichmentError> {
    let cleaned = strip_code_fences(response);
    if cleaned.is_empty() {
        return Err(EnrichmentError::MalformedResponse(
            "Empty response".to_string(),
        ));
    }

    #[derive(Deserialize)]
    struct RawDetails {
        prevention: Vec<String>,
        remedies: Vec<String>,
        specialist: String,
        risk: String,
    }

    let raw: RawDetails = serde_json::from_str(cleaned)
        .map_err(|e| EnrichmentError::MalformedResponse(e.to_string()))?;

    let risk = match raw.risk.trim().to_lowercase().as_str() {
        "mild" => RiskLevel::Mild,
        "moderate" => RiskLevel::Moderate,
        "severe" => RiskLevel::Severe,
        other => {
            return Err(EnrichmentError::MalformedResponse(format!(
                "Unknown risk level: {other}"
            )))
        }
    };

    Ok(DiseaseDetails {
        prevention: raw.prevention,
        remedies: raw.remedies,
        specialist: raw.specialist,
        risk,
    })
}

/// Strip a surrounding markdown code fence and an optional `json` tag.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let inner = trimmed.trim_matches('`').trim();
    inner.strip_prefix("json").map(str::trim).unwrap_or(inner)
}
