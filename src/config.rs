/// Application-level constants
pub const APP_NAME: &str = "Symptriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How many candidate diseases the initial ranking returns.
pub const INITIAL_TOP_N: usize = 5;

/// How many candidates the finalization scoring pass keeps.
pub const FINAL_TOP_N: usize = 1;

/// Cap on follow-up questions asked per session.
pub const MAX_FOLLOW_UP_QUESTIONS: usize = 10;

/// Linear downweighting applied to rare diseases:
/// `adjusted = similarity * (1 - RARITY_WEIGHT * is_rare)`.
pub const RARITY_WEIGHT: f32 = 0.2;

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
