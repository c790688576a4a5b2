use std::fmt;

use lm_config::LoggerConfig;
use lm_core::{EventId, LogLevel, LogState, Logger};
use tracing::Level;

/// `tracing` target of every event recorded through [`TracingLogger`].
///
/// Filter directives address structured call sites through this target, e.g.
/// `error,lm=trace`.
pub const TARGET: &str = "lm";

/// [`Logger`] that forwards structured call sites into `tracing`.
///
/// `Critical` has no `tracing` counterpart and is emitted at `ERROR`; the
/// original severity is kept in the `severity` field. The holder is rendered
/// exactly once per recorded event.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    min_level: LogLevel,
    include_state: bool,
}

impl TracingLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            include_state: true,
        }
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            min_level: config.min_level,
            include_state: config.include_state,
        }
    }

    pub fn with_state(mut self, include_state: bool) -> Self {
        self.include_state = include_state;
        self
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::from_config(&LoggerConfig::default())
    }
}

/// Dispatch to the `tracing` macro matching a runtime [`LogLevel`].
macro_rules! emit_at {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            LogLevel::Trace => tracing::trace!(target: TARGET, $($fields)+),
            LogLevel::Debug => tracing::debug!(target: TARGET, $($fields)+),
            LogLevel::Information => tracing::info!(target: TARGET, $($fields)+),
            LogLevel::Warning => tracing::warn!(target: TARGET, $($fields)+),
            LogLevel::Error | LogLevel::Critical => tracing::error!(target: TARGET, $($fields)+),
            LogLevel::None => {}
        }
    };
}

impl Logger for TracingLogger {
    fn is_enabled(&self, level: LogLevel) -> bool {
        if !level.passes(self.min_level) {
            return false;
        }
        match level {
            LogLevel::Trace => tracing::enabled!(target: TARGET, Level::TRACE),
            LogLevel::Debug => tracing::enabled!(target: TARGET, Level::DEBUG),
            LogLevel::Information => tracing::enabled!(target: TARGET, Level::INFO),
            LogLevel::Warning => tracing::enabled!(target: TARGET, Level::WARN),
            LogLevel::Error | LogLevel::Critical => tracing::enabled!(target: TARGET, Level::ERROR),
            LogLevel::None => false,
        }
    }

    fn record(&self, level: LogLevel, event_id: EventId, state: &dyn LogState) {
        if level == LogLevel::None {
            return;
        }
        let message = state.render();
        let fields = StateFields(state);
        let state_field = self
            .include_state
            .then_some(tracing::field::display(&fields));
        let error = state.error();
        emit_at!(
            level,
            event_id = event_id.id(),
            event_name = event_id.name(),
            severity = level.as_str(),
            state = state_field,
            error = error,
            "{}",
            message
        );
    }
}

/// `name=value` pairs separated by spaces, in positional order.
struct StateFields<'a>(&'a dyn LogState);

impl fmt::Display for StateFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.entries().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
