use std::fmt;

use chrono::{DateTime, Local};
use derive_more::Display;

use crate::ext::TimestampExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[display("CREATE")]
    Create,
    #[display("MKDIR")]
    Mkdir,
    #[display("DELETE")]
    Delete,
    #[display("RENAME")]
    Rename,
    #[display("SEARCH")]
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Status {
    #[display("SUCCESS")]
    Success,
    /// A query that ran fine but matched nothing
    #[display("NO_RESULTS")]
    NoResults,
}

/// One audit record, rendered as
/// `[timestamp] [OP] [target] [STATUS] [details]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub operation: Operation,
    pub target: String,
    pub status: Status,
    pub details: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] [{}] [{}] [{}]",
            self.timestamp.log_stamp(),
            self.operation,
            self.target,
            self.status,
            self.details
        )
    }
}

/// Append-only record of successful operations, oldest first.
#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    entries: Vec<LogEntry>,
}

impl OperationLog {
    pub fn record(
        &mut self,
        operation: Operation,
        target: impl Into<String>,
        status: Status,
        details: impl Into<String>,
    ) {
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            operation,
            target: target.into(),
            status,
            details: details.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
