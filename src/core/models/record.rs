use serde::{Deserialize, Serialize};

use crate::core::models::level::Level;

/// A single log record handed to a sink.
///
/// The sink borrows the record for the duration of one emission and never
/// mutates it; producers keep ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Name of the producer (logger) that created the record, if any.
    pub source: Option<String>,
    pub level: Level,
    pub payload: String,
}

impl Record {
    /// Create a record stamped with the current time.
    pub fn new(level: Level, payload: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            source: None,
            level,
            payload: payload.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
