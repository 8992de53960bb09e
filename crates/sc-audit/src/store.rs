//! Audit sinks.

use crate::types::QueryLogEntry;
use crate::{AuditError, AuditResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Write-only destination for audit records.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &QueryLogEntry) -> AuditResult<()>;
}

/// Appends one JSON line per entry to a file.
#[derive(Debug, Clone)]
pub struct JsonlAuditLog {
    path: PathBuf,
}

impl JsonlAuditLog {
    /// Use `path`, creating its parent directory if needed.
    pub fn new(path: impl Into<PathBuf>) -> AuditResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry back, skipping blank lines.
    pub fn read_all(&self) -> AuditResult<Vec<QueryLogEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut entries = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                entries.push(serde_json::from_str(line)?);
            }
        }
        Ok(entries)
    }
}

impl AuditSink for JsonlAuditLog {
    fn record(&self, entry: &QueryLogEntry) -> AuditResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // Single write per line so concurrent appenders do not interleave.
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<QueryLogEntry>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<QueryLogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditLog {
    fn record(&self, entry: &QueryLogEntry) -> AuditResult<()> {
        self.entries
            .lock()
            .map_err(|_| AuditError::Poisoned)?
            .push(entry.clone());
        Ok(())
    }
}

impl<S: AuditSink + ?Sized> AuditSink for &S {
    fn record(&self, entry: &QueryLogEntry) -> AuditResult<()> {
        (**self).record(entry)
    }
}

impl<S: AuditSink + ?Sized> AuditSink for Arc<S> {
    fn record(&self, entry: &QueryLogEntry) -> AuditResult<()> {
        (**self).record(entry)
    }
}

impl<S: AuditSink + ?Sized> AuditSink for Box<S> {
    fn record(&self, entry: &QueryLogEntry) -> AuditResult<()> {
        (**self).record(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_keeps_order() {
        let log = MemoryAuditLog::new();
        assert!(log.is_empty());
        log.record(&QueryLogEntry::new(10.0, 450.0, true)).unwrap();
        log.record(&QueryLogEntry::new(10.0, 5000.0, false)).unwrap();
        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_valid);
        assert!(!entries[1].is_valid);
    }
}
