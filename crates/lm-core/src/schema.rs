use serde::{Deserialize, Serialize};

use crate::level::LogLevel;

/// Declarative description of one strongly-typed log statement.
///
/// A passive record consumed by code generation: it is never validated and
/// has no behaviour beyond reading and writing its fields.
///
/// ```
/// use lm_core::{LogLevel, LoggerMessage};
///
/// let msg = LoggerMessage::new(0, LogLevel::Critical, "Could not open socket to `{hostName}`");
/// assert_eq!(msg.event_name_or("CouldNotOpenSocket"), "CouldNotOpenSocket");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerMessage {
    /// Stable event id.
    pub event_id: i32,
    /// Event name; defaults to the name of the declaring operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// Level the statement logs at.
    pub level: LogLevel,
    /// Message template; may reference any of the operation's parameters.
    pub message: String,
}

impl LoggerMessage {
    pub fn new(event_id: i32, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            event_id,
            event_name: None,
            level,
            message: message.into(),
        }
    }

    pub fn with_event_name(mut self, name: impl Into<String>) -> Self {
        self.event_name = Some(name.into());
        self
    }

    /// The explicit event name, or `operation` when none was set.
    pub fn event_name_or<'a>(&'a self, operation: &'a str) -> &'a str {
        self.event_name.as_deref().unwrap_or(operation)
    }
}
