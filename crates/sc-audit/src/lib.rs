//! sc-audit: append-only log of calculation attempts.

pub mod store;
pub mod types;

pub use store::{AuditSink, JsonlAuditLog, MemoryAuditLog};
pub use types::*;

pub type AuditResult<T> = Result<T, AuditError>;

#[derive(thiserror::Error, Debug)]
pub enum AuditError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Audit store poisoned")]
    Poisoned,
}
