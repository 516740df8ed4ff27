/// Errors raised by the query and validation engines.
///
/// `Configuration` is reserved for programmer errors (bad page size, unknown
/// sort field, invalid regex, unresolvable custom check). Records that do not
/// match and values that fail a rule are ordinary results, never errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Record source error: {0}")]
    Source(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for building a [`CoreError::Configuration`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether this error is a programmer/configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
