use serde::Serialize;

/// One ranked disease produced by a scoring call.
///
/// Ephemeral — recomputed on every call. Ordering is by `adjusted`
/// descending; ties keep the original dataset order.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub disease: String,
    /// Raw cosine similarity between the user vector and the disease vector.
    pub similarity: f32,
    /// Similarity after the rarity penalty.
    pub adjusted: f32,
    /// `adjusted` normalized over the selected candidates (sums to 1.0).
    pub probability: f32,
}
