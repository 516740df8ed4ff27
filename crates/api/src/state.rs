use std::sync::Arc;

use courier_core::source::SourceCatalog;
use courier_core::types::YearMonth;
use courier_core::validation::CheckRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Listings served by the query endpoints.
    pub catalog: Arc<SourceCatalog>,
    /// Month card expiry is judged against. `None` means the current month.
    pub expiry_month: Option<YearMonth>,
}

impl AppState {
    pub fn new(config: ServerConfig, catalog: SourceCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            expiry_month: None,
        }
    }

    /// Built-in checks with card expiry judged against [`Self::expiry_month`].
    pub fn checks(&self) -> CheckRegistry {
        CheckRegistry::with_builtins(self.expiry_month.unwrap_or_else(YearMonth::current))
    }
}
