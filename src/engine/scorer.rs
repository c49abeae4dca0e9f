//! Cosine-similarity ranking with rarity penalty.
//!
//! Pure function of index + input: no state, no side effects. Safe to call
//! concurrently from any number of sessions sharing one index.

use crate::config::RARITY_WEIGHT;
use crate::engine::index::CorpusIndex;
use crate::engine::{normalize_term, TriageError};
use crate::models::RankedCandidate;

/// Rank all diseases against the user's symptom set and keep the top `top_n`.
///
/// Candidates come back sorted by adjusted score descending; equal scores
/// keep their original dataset order (stable sort). The selected adjusted
/// scores are normalized to a probability distribution summing to 1.0.
///
/// # Errors
/// `TriageError::DegenerateScore` when `top_n > 0` and every adjusted score
/// is zero — the caller decides how to present "no match found" instead of
/// this function dividing by zero.
pub fn score(
    index: &CorpusIndex,
    user_symptoms: &[String],
    top_n: usize,
) -> Result<Vec<RankedCandidate>, TriageError> {
    if top_n == 0 {
        return Ok(Vec::new());
    }

    let terms: Vec<String> = user_symptoms
        .iter()
        .map(|s| normalize_term(s))
        .filter(|s| !s.is_empty())
        .collect();
    let user_vector = index.query_vector(&terms);

    let mut scored: Vec<(usize, f32, f32)> = (0..index.len())
        .map(|i| {
            let similarity = cosine_similarity(&user_vector, index.vector(i));
            let is_rare = if index.records()[i].is_rare { 1.0 } else { 0.0 };
            let adjusted = similarity * (1.0 - RARITY_WEIGHT * is_rare);
            (i, similarity, adjusted)
        })
        .collect();

    // Stable sort: ties keep dataset order.
    scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_n);

    let sum: f32 = scored.iter().map(|(_, _, adjusted)| adjusted).sum();
    if sum <= 0.0 {
        tracing::debug!(
            symptoms = terms.len(),
            "All adjusted scores are zero, refusing to normalize"
        );
        return Err(TriageError::DegenerateScore);
    }

    Ok(scored
        .into_iter()
        .map(|(i, similarity, adjusted)| RankedCandidate {
            disease: index.records()[i].name.clone(),
            similarity,
            adjusted,
            probability: adjusted / sum,
        })
        .collect())
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiseaseRecord;

    fn build(records: Vec<DiseaseRecord>) -> CorpusIndex {
        CorpusIndex::build(records).unwrap()
    }

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cosine_similarity_identical_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim - 1.0).abs() < 0.01);
    }

    #[test]
    fn cosine_similarity_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let sim = cosine_similarity(&a, &b);
        assert!(sim.abs() < 0.01);
    }

    #[test]
    fn verbatim_symptom_set_scores_above_zero() {
        let index = build(vec![
            DiseaseRecord::new("Flu", &["fever", "cough"], false),
            DiseaseRecord::new("Migraine", &["headache"], false),
        ]);

        let ranked = score(&index, &terms(&["fever", "cough"]), 5).unwrap();
        let flu = ranked.iter().find(|c| c.disease == "Flu").unwrap();
        assert!(flu.similarity > 0.0);
    }

    #[test]
    fn candidates_sorted_by_adjusted_descending() {
        let index = build(vec![
            DiseaseRecord::new("Migraine", &["headache", "nausea"], false),
            DiseaseRecord::new("Flu", &["fever", "cough", "headache"], false),
            DiseaseRecord::new("Cold", &["sneezing", "cough"], false),
        ]);

        let ranked = score(&index, &terms(&["fever", "cough", "headache"]), 3).unwrap();
        for pair in ranked.windows(2) {
            assert!(pair[0].adjusted >= pair[1].adjusted);
        }
        assert_eq!(ranked[0].disease, "Flu");
    }

    #[test]
    fn equal_scores_keep_dataset_order() {
        let index = build(vec![
            DiseaseRecord::new("First", &["fever", "cough"], false),
            DiseaseRecord::new("Second", &["fever", "cough"], false),
        ]);

        let ranked = score(&index, &terms(&["fever", "cough"]), 2).unwrap();
        assert_eq!(ranked[0].disease, "First");
        assert_eq!(ranked[1].disease, "Second");
    }

    #[test]
    fn probabilities_sum_to_one() {
        let index = build(vec![
            DiseaseRecord::new("Flu", &["fever", "cough", "headache"], false),
            DiseaseRecord::new("Cold", &["sneezing", "cough"], false),
            DiseaseRecord::new("Migraine", &["headache", "nausea"], false),
        ]);

        let ranked = score(&index, &terms(&["cough", "headache"]), 3).unwrap();
        let sum: f32 = ranked.iter().map(|c| c.probability).sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rare_disease_ranked_below_common_twin() {
        // Identical symptom lists — only the rarity penalty separates them.
        let index = build(vec![
            DiseaseRecord::new("Flu", &["fever", "cough"], false),
            DiseaseRecord::new("RareLungDisease", &["fever", "cough"], true),
        ]);

        let ranked = score(&index, &terms(&["fever", "cough"]), 2).unwrap();
        assert_eq!(ranked[0].disease, "Flu");
        assert_eq!(ranked[1].disease, "RareLungDisease");
        assert!((ranked[0].similarity - ranked[1].similarity).abs() < 1e-6);
        assert!(ranked[0].adjusted > ranked[1].adjusted);
    }

    #[test]
    fn no_overlap_is_degenerate() {
        let index = build(vec![DiseaseRecord::new("Flu", &["fever"], false)]);
        let result = score(&index, &terms(&["broken leg"]), 5);
        assert!(matches!(result, Err(TriageError::DegenerateScore)));
    }

    #[test]
    fn empty_symptom_set_is_degenerate_not_a_crash() {
        let index = build(vec![DiseaseRecord::new("Flu", &["fever"], false)]);
        let result = score(&index, &[], 5);
        assert!(matches!(result, Err(TriageError::DegenerateScore)));
    }

    #[test]
    fn top_n_zero_returns_empty() {
        let index = build(vec![DiseaseRecord::new("Flu", &["fever"], false)]);
        assert!(score(&index, &terms(&["fever"]), 0).unwrap().is_empty());
    }

    #[test]
    fn top_n_truncates() {
        let index = build(vec![
            DiseaseRecord::new("A", &["fever", "cough"], false),
            DiseaseRecord::new("B", &["fever"], false),
            DiseaseRecord::new("C", &["cough"], false),
        ]);

        let ranked = score(&index, &terms(&["fever", "cough"]), 2).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn user_terms_normalized_before_matching() {
        let index = build(vec![DiseaseRecord::new("Flu", &["fever"], false)]);
        let ranked = score(&index, &terms(&["  FEVER "]), 1).unwrap();
        assert!(ranked[0].similarity > 0.0);
    }
}
