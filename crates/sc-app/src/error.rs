//! Error types for the sc-app service layer.

use std::path::PathBuf;

/// Failures outside a single calculation: configuration, engine setup and
/// audit storage. Calculation failures never surface here; they end up in
/// the result context instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Engine not available: {0}")]
    EngineUnavailable(String),

    #[error("Audit error: {0}")]
    Audit(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation failed: {0}")]
    Calculation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for sc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sc_audit::AuditError> for AppError {
    fn from(err: sc_audit::AuditError) -> Self {
        AppError::Audit(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
