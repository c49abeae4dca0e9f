pub mod config;
pub mod models;
pub mod engine; // corpus index + scorer + follow-ups + session machine
pub mod enrichment; // generative detail enricher (external collaborator)
pub mod service; // surface consumed by the HTTP layer

use tracing_subscriber::EnvFilter;

/// Initialize tracing from the environment, falling back to the crate default.
///
/// Call once at process startup, before building the corpus index.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Symptriage starting v{}", config::APP_VERSION);
}
