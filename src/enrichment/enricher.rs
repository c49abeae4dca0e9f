//! Caching detail enricher with fixed fallback.
//!
//! One enrichment call per disease per process lifetime: results (including
//! fallbacks) are cached by disease name. Failures of the backend are logged
//! and masked — callers always get a usable record.

use std::collections::HashMap;
use std::sync::Mutex;

use super::client::TextGenerate;
use super::parser::parse_details;
use super::types::DiseaseDetails;
use super::EnrichmentError;

const SYSTEM_PROMPT: &str = "You are a medical assistant. \
    Output ONLY valid JSON with exactly these keys: \
    prevention, remedies, specialist, risk. \
    No explanations, no markdown.";

/// Caching wrapper around a generative backend.
pub struct DetailEnricher {
    backend: Box<dyn TextGenerate + Send + Sync>,
    cache: Mutex<HashMap<String, DiseaseDetails>>,
}

impl DetailEnricher {
    pub fn new(backend: Box<dyn TextGenerate + Send + Sync>) -> Self {
        Self {
            backend,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Advice record for a disease. Never fails: backend errors and
    /// malformed replies substitute the fixed fallback record, which is
    /// cached like any other result so the backend is not retried.
    pub fn details_for(&self, disease: &str) -> DiseaseDetails {
        if let Ok(cache) = self.cache.lock() {
            if let Some(cached) = cache.get(disease) {
                return cached.clone();
            }
        }

        let details = match self.fetch(disease) {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(disease = %disease, error = %e, "Enrichment failed, using fallback");
                DiseaseDetails::fallback()
            }
        };

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(disease.to_string(), details.clone());
        }
        details
    }

    fn fetch(&self, disease: &str) -> Result<DiseaseDetails, EnrichmentError> {
        let prompt = build_prompt(disease);
        let response = self.backend.generate(SYSTEM_PROMPT, &prompt)?;
        parse_details(&response)
    }
}

fn build_prompt(disease: &str) -> String {
    format!(
        "Return structured health advice for the disease: {disease}.\n\
         \n\
         Instructions for each key:\n\
         - \"prevention\": 3-5 short prevention tips (diet, lifestyle, hygiene).\n\
         - \"remedies\": 2-4 safe home remedies for mild symptoms.\n\
         - \"specialist\": the type of doctor or specialist to consult.\n\
         - \"risk\": one word among [\"Mild\", \"Moderate\", \"Severe\"].\n\
         \n\
         Example format:\n\
         {{\n\
           \"prevention\": [\"Tip1\", \"Tip2\"],\n\
           \"remedies\": [\"Remedy1\", \"Remedy2\"],\n\
           \"specialist\": \"Specialist Name\",\n\
           \"risk\": \"Mild\"\n\
         }}"
    )
}
