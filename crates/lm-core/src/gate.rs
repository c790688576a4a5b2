//! The enabled-check that must precede holder construction.

use crate::event::EventId;
use crate::holder::LogState;
use crate::level::LogLevel;
use crate::logger::Logger;

/// Record one event, building its state only if `logger` is enabled for
/// `level`.
///
/// When disabled, `build` is never called: no holder exists, no value is
/// converted and nothing is rendered. The check and the record are not
/// atomic; a sink that turns off in between sees one extra record.
#[inline]
pub fn log<L, S, F>(logger: &L, level: LogLevel, event_id: EventId, build: F)
where
    L: Logger + ?Sized,
    S: LogState,
    F: FnOnce() -> S,
{
    if logger.is_enabled(level) {
        let state = build();
        logger.record(level, event_id, &state);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::capture::MemoryLogger;
    use crate::holder::StateHolder1;
    use crate::logger::NullLogger;
    use crate::template::Template;

    const EVT: EventId = EventId::new(9, "Gated");

    #[test]
    fn disabled_logger_skips_construction() {
        let built = Cell::new(false);
        log(&NullLogger, LogLevel::Critical, EVT, || {
            built.set(true);
            StateHolder1::new(|_, _| unreachable!(), None, ["x"], 1)
        });
        assert!(!built.get());
    }

    #[test]
    fn below_minimum_level_skips_construction() {
        let logger = MemoryLogger::new(LogLevel::Warning);
        let built = Cell::new(0);
        log(&logger, LogLevel::Debug, EVT, || {
            built.set(built.get() + 1);
            StateHolder1::new(|s, _| Template::new("{x}").render(s), None, ["x"], 1)
        });
        assert_eq!(built.get(), 0);
        assert!(logger.is_empty());
    }

    #[test]
    fn enabled_logger_records_once() {
        let logger = MemoryLogger::new(LogLevel::Trace);
        log(&logger, LogLevel::Error, EVT, || {
            StateHolder1::new(|s, _| Template::new("x is {x}").render(s), None, ["x"], 5)
        });
        let records = logger.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event_id, EVT);
        assert_eq!(records[0].message, "x is 5");
    }
}
