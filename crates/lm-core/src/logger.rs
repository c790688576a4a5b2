use std::rc::Rc;
use std::sync::Arc;

use crate::event::EventId;
use crate::holder::LogState;
use crate::level::LogLevel;

/// The sink boundary that call sites talk to.
///
/// A call site must ask [`Logger::is_enabled`] before it builds a holder;
/// [`Logger::record`] receives the holder with its error and render function
/// attached. The sink decides whether, and when, to call `state.render()`.
pub trait Logger {
    fn is_enabled(&self, level: LogLevel) -> bool;

    fn record(&self, level: LogLevel, event_id: EventId, state: &dyn LogState);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn is_enabled(&self, level: LogLevel) -> bool {
        (**self).is_enabled(level)
    }

    fn record(&self, level: LogLevel, event_id: EventId, state: &dyn LogState) {
        (**self).record(level, event_id, state)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn is_enabled(&self, level: LogLevel) -> bool {
        (**self).is_enabled(level)
    }

    fn record(&self, level: LogLevel, event_id: EventId, state: &dyn LogState) {
        (**self).record(level, event_id, state)
    }
}

impl<L: Logger + ?Sized> Logger for Rc<L> {
    fn is_enabled(&self, level: LogLevel) -> bool {
        (**self).is_enabled(level)
    }

    fn record(&self, level: LogLevel, event_id: EventId, state: &dyn LogState) {
        (**self).record(level, event_id, state)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn is_enabled(&self, level: LogLevel) -> bool {
        (**self).is_enabled(level)
    }

    fn record(&self, level: LogLevel, event_id: EventId, state: &dyn LogState) {
        (**self).record(level, event_id, state)
    }
}

/// Logger that is never enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn record(&self, _level: LogLevel, _event_id: EventId, _state: &dyn LogState) {}
}
