//! In-memory logger for tests and examples.

use std::sync::Mutex;

use crate::event::EventId;
use crate::holder::LogState;
use crate::level::LogLevel;
use crate::logger::Logger;

/// Owned snapshot of one recorded event.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub level: LogLevel,
    pub event_id: EventId,
    /// Output of the holder's render function, called once per record.
    pub message: String,
    /// `(name, rendered value)` pairs in positional order.
    pub entries: Vec<(String, String)>,
    pub error: Option<String>,
}

impl CapturedRecord {
    pub fn entry(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Keeps every record at or above `min_level`.
#[derive(Debug)]
pub struct MemoryLogger {
    min_level: LogLevel,
    records: Mutex<Vec<CapturedRecord>>,
}

impl MemoryLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Copy of everything recorded so far.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().expect("capture lock poisoned").clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.records.lock().expect("capture lock poisoned"))
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("capture lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new(LogLevel::Trace)
    }
}

impl Logger for MemoryLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.min_level)
    }

    fn record(&self, level: LogLevel, event_id: EventId, state: &dyn LogState) {
        let record = CapturedRecord {
            level,
            event_id,
            message: state.render(),
            entries: state
                .entries()
                .map(|e| (e.name().to_string(), e.value().to_string()))
                .collect(),
            error: state.error().map(|e| e.to_string()),
        };
        self.records
            .lock()
            .expect("capture lock poisoned")
            .push(record);
    }
}
