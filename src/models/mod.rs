pub mod candidate;
pub mod disease;

pub use candidate::RankedCandidate;
pub use disease::DiseaseRecord;
