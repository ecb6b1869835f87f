//! Generator error types

use thiserror::Error;

/// Errors raised while turning a configuration into generated files
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A task name was looked up that the catalog does not contain
    #[error("Unknown task: '{0}'")]
    UnknownTask(String),

    /// Ambiguous deploy selection or a missing deploy parameter
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invalid task graph: missing reference, duplicate, bad ordering or cycle
    #[error("Composition error: {0}")]
    Composition(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
