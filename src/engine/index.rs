//! Frozen TF-IDF model over the disease dataset.
//!
//! Each disease's symptom list is one "document" whose tokens are the symptom
//! terms themselves — terms are already discrete, so matching is exact-term
//! only (no stemming). Built once at startup; read-only thereafter, safe to
//! share behind `Arc` without locking. Rebuilding means building a new index.

use std::collections::HashMap;

use thiserror::Error;

use crate::engine::normalize_term;
use crate::models::DiseaseRecord;

/// Errors building the corpus index. Fatal at startup.
#[derive(Debug, Error)]
pub enum CorpusBuildError {
    #[error("Disease dataset is empty")]
    EmptyDataset,
    #[error("No disease record has any symptom terms")]
    EmptyVocabulary,
}

/// Read-only vector-space model: one TF-IDF vector per disease over the
/// shared symptom vocabulary.
pub struct CorpusIndex {
    /// Records in dataset order, symptom terms normalized.
    records: Vec<DiseaseRecord>,
    /// Disease name → position in `records`.
    name_to_idx: HashMap<String, usize>,
    /// Symptom term → dimension index, first-seen order. Frozen after build.
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per dimension:
    /// `ln((1 + n_docs) / (1 + df)) + 1`.
    idf: Vec<f32>,
    /// One dense TF-IDF vector per record, all of dimension `idf.len()`.
    vectors: Vec<Vec<f32>>,
}

impl CorpusIndex {
    /// Build the index from the full dataset.
    ///
    /// # Errors
    /// `EmptyDataset` when there are no records; `EmptyVocabulary` when no
    /// record carries a single symptom term.
    pub fn build(records: Vec<DiseaseRecord>) -> Result<Self, CorpusBuildError> {
        if records.is_empty() {
            return Err(CorpusBuildError::EmptyDataset);
        }

        // Normalize symptom terms up front so every later lookup is exact.
        let records: Vec<DiseaseRecord> = records
            .into_iter()
            .map(|r| {
                let symptoms = r
                    .symptoms
                    .iter()
                    .map(|s| normalize_term(s))
                    .filter(|s| !s.is_empty())
                    .collect();
                DiseaseRecord {
                    name: r.name,
                    symptoms,
                    is_rare: r.is_rare,
                }
            })
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_frequency: Vec<usize> = Vec::new();

        for record in &records {
            let mut seen_in_doc: Vec<usize> = Vec::new();
            for term in &record.symptoms {
                let dim = *vocabulary.entry(term.clone()).or_insert_with(|| {
                    doc_frequency.push(0);
                    doc_frequency.len() - 1
                });
                if !seen_in_doc.contains(&dim) {
                    seen_in_doc.push(dim);
                    doc_frequency[dim] += 1;
                }
            }
        }

        if vocabulary.is_empty() {
            return Err(CorpusBuildError::EmptyVocabulary);
        }

        let n_docs = records.len() as f32;
        let idf: Vec<f32> = doc_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let mut name_to_idx = HashMap::with_capacity(records.len());
        let mut vectors = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            name_to_idx.insert(record.name.clone(), i);

            let mut vector = vec![0.0f32; idf.len()];
            for term in &record.symptoms {
                if let Some(&dim) = vocabulary.get(term) {
                    vector[dim] += idf[dim];
                }
            }
            vectors.push(vector);
        }

        tracing::info!(
            diseases = records.len(),
            vocabulary = vocabulary.len(),
            "Corpus index built"
        );

        Ok(Self {
            records,
            name_to_idx,
            vocabulary,
            idf,
            vectors,
        })
    }

    /// Number of diseases in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no diseases. Build guarantees it never does.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Vocabulary size — the dimensionality of every vector.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Record at dataset position `idx`.
    pub fn record(&self, idx: usize) -> Option<&DiseaseRecord> {
        self.records.get(idx)
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    /// The known symptom terms of a disease, in dataset order.
    pub fn symptoms_of(&self, disease: &str) -> Option<&[String]> {
        self.name_to_idx
            .get(disease)
            .map(|&i| self.records[i].symptoms.as_slice())
    }

    /// The TF-IDF vector of the record at `idx`.
    pub(crate) fn vector(&self, idx: usize) -> &[f32] {
        &self.vectors[idx]
    }

    /// Build a TF-IDF vector for a pseudo-document of already-normalized
    /// terms. Terms outside the frozen vocabulary contribute zero weight —
    /// they are not errors.
    pub(crate) fn query_vector(&self, terms: &[String]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.idf.len()];
        for term in terms {
            if let Some(&dim) = self.vocabulary.get(term) {
                vector[dim] += self.idf[dim];
            }
        }
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<DiseaseRecord> {
        vec![
            DiseaseRecord::new("Flu", &["fever", "cough", "headache"], false),
            DiseaseRecord::new("Cold", &["sneezing", "cough"], false),
            DiseaseRecord::new("Migraine", &["headache", "nausea"], false),
        ]
    }

    #[test]
    fn build_empty_dataset_errors() {
        let result = CorpusIndex::build(vec![]);
        assert!(matches!(result, Err(CorpusBuildError::EmptyDataset)));
    }

    #[test]
    fn build_all_symptomless_records_errors() {
        let records = vec![
            DiseaseRecord::new("A", &[], false),
            DiseaseRecord::new("B", &[], false),
        ];
        let result = CorpusIndex::build(records);
        assert!(matches!(result, Err(CorpusBuildError::EmptyVocabulary)));
    }

    #[test]
    fn every_record_gets_a_vector_of_shared_dimension() {
        let index = CorpusIndex::build(sample_records()).unwrap();
        assert_eq!(index.len(), 3);
        // fever, cough, headache, sneezing, nausea
        assert_eq!(index.dimension(), 5);
        for i in 0..index.len() {
            assert_eq!(index.vector(i).len(), index.dimension());
        }
    }

    #[test]
    fn symptom_terms_are_normalized_at_build() {
        let records = vec![DiseaseRecord::new("Flu", &["  FEVER ", "Cough"], false)];
        let index = CorpusIndex::build(records).unwrap();
        assert_eq!(
            index.symptoms_of("Flu").unwrap(),
            &["fever".to_string(), "cough".to_string()],
        );
    }

    #[test]
    fn rarer_terms_carry_more_weight() {
        let index = CorpusIndex::build(sample_records()).unwrap();
        // "cough" appears in 2 of 3 documents, "nausea" in 1 of 3.
        let cough = index.query_vector(&["cough".to_string()]);
        let nausea = index.query_vector(&["nausea".to_string()]);
        let max = |v: &[f32]| v.iter().cloned().fold(0.0f32, f32::max);
        assert!(max(&nausea) > max(&cough));
    }

    #[test]
    fn unknown_query_terms_contribute_zero() {
        let index = CorpusIndex::build(sample_records()).unwrap();
        let vector = index.query_vector(&["levitation".to_string()]);
        assert!(vector.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn symptoms_of_unknown_disease_is_none() {
        let index = CorpusIndex::build(sample_records()).unwrap();
        assert!(index.symptoms_of("Dragon Pox").is_none());
    }
}
