use serde::{Deserialize, Serialize};

/// Risk level attached to a diagnosis by the enrichment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Mild,
    Moderate,
    Severe,
}

/// Human-facing advice for one disease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseDetails {
    /// 3–5 short prevention tips (diet, lifestyle, hygiene).
    pub prevention: Vec<String>,
    /// 2–4 safe home remedies for mild symptoms.
    pub remedies: Vec<String>,
    /// The type of doctor or specialist to consult.
    pub specialist: String,
    pub risk: RiskLevel,
}

impl DiseaseDetails {
    /// Fixed record substituted whenever the service fails or returns
    /// malformed data.
    pub fn fallback() -> Self {
        Self {
            prevention: vec!["Data not available".to_string()],
            remedies: vec!["Data not available".to_string()],
            specialist: "General Physician".to_string(),
            risk: RiskLevel::Moderate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_record_matches_contract() {
        let details = DiseaseDetails::fallback();
        assert_eq!(details.prevention, vec!["Data not available"]);
        assert_eq!(details.remedies, vec!["Data not available"]);
        assert_eq!(details.specialist, "General Physician");
        assert_eq!(details.risk, RiskLevel::Moderate);
    }

    #[test]
    fn risk_level_round_trips_through_json() {
        let json = serde_json::to_string(&RiskLevel::Severe).unwrap();
        assert_eq!(json, "\"Severe\"");
        let parsed: RiskLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, RiskLevel::Severe);
    }
}
