use serde::{Deserialize, Serialize};

/// One disease from the dataset: a name, its known symptom terms, and a
/// rarity flag. Immutable after corpus load — the index owns the only copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// Disease name, unique within the dataset.
    pub name: String,
    /// Known symptom terms, in dataset order.
    pub symptoms: Vec<String>,
    /// Whether the disease is considered rare (downweighted during ranking).
    pub is_rare: bool,
}

impl DiseaseRecord {
    pub fn new(name: impl Into<String>, symptoms: &[&str], is_rare: bool) -> Self {
        Self {
            name: name.into(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            is_rare,
        }
    }
}
