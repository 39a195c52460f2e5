use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the selector remembers about one pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRecord {
    #[serde(rename = "idx")]
    pub index: usize,
    pub score: u8,
}

/// Write-only side channel for statement picks. The selector never reads it
/// back and ignores every failure.
pub trait StatementLog: Send + Sync {
    fn record(&self, key: &str, record: StatementRecord) -> Result<(), StatementLogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StatementLogError {
    #[error("statement log unavailable: {0}")]
    Unavailable(String),
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatementLog;

impl StatementLog for NullStatementLog {
    fn record(&self, _key: &str, _record: StatementRecord) -> Result<(), StatementLogError> {
        Ok(())
    }
}

/// Emits each pick as a debug event and keeps nothing in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatementLog;

impl StatementLog for TracingStatementLog {
    fn record(&self, key: &str, record: StatementRecord) -> Result<(), StatementLogError> {
        debug!(key, idx = record.index, score = record.score, "statement picked");
        Ok(())
    }
}
