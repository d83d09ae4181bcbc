use std::sync::Arc;

use crate::config::Config;
use crate::optimize::patterns::PatternTable;
use crate::providers::AiProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable resume parser. Selected at startup via AI_PROVIDER env.
    pub ai: Arc<dyn AiProvider>,
    /// Compiled keyword patterns, built once at startup and shared read-only.
    pub patterns: Arc<PatternTable>,
}
