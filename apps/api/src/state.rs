use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::wizard::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Pluggable analysis backend. Default: KeywordAnalyzer. Swap via ANALYZER env.
    pub analyzer: Arc<dyn Analyzer>,
    /// Learning-resource catalog, fixed at startup.
    pub catalog: Arc<Catalog>,
}
