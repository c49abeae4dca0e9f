//! Follow-up symptom selection.
//!
//! Collects the symptoms of the top-ranked diseases that the user has not
//! already reported. No information-gain weighting — the order is simply
//! deterministic: diseases in ranked order, each disease's symptoms in
//! dataset order, first occurrence wins. Repeated calls with identical
//! inputs always produce the identical list.

use crate::engine::index::CorpusIndex;
use crate::engine::normalize_term;

/// Select up to `max_questions` symptom terms worth asking about.
///
/// Never returns a term already present in `user_symptoms`. Diseases unknown
/// to the index contribute nothing.
pub fn select_follow_ups(
    index: &CorpusIndex,
    user_symptoms: &[String],
    top_diseases: &[String],
    max_questions: usize,
) -> Vec<String> {
    let known: Vec<String> = user_symptoms.iter().map(|s| normalize_term(s)).collect();

    let mut selected: Vec<String> = Vec::new();
    for disease in top_diseases {
        let Some(symptoms) = index.symptoms_of(disease) else {
            continue;
        };
        for symptom in symptoms {
            if selected.len() >= max_questions {
                return selected;
            }
            if !known.contains(symptom) && !selected.contains(symptom) {
                selected.push(symptom.clone());
            }
        }
    }
    selected
}
