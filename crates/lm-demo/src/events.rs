//! Log statements of the demo service.
//!
//! Each statement is written in the shape a code generator emits for one
//! declaration: a `const` event id, an enabled-check, the arity-matching
//! holder and a render function that captures nothing.

use lm_core::{
    ErrorRef, EventId, LogLevel, Logger, StateHolder0, StateHolder1, StateHolder3, Template, gate,
};

pub(crate) const COULD_NOT_OPEN_SOCKET_MESSAGE: &str = "Could not open socket to `{hostName}`";
pub(crate) const SAY_HELLO_MESSAGE: &str = "Hello {name}";
pub(crate) const STREAM_RESET_MESSAGE: &str =
    "Stream {streamId} on connection {connectionId} reset after {elapsedMs} ms";
pub(crate) const SERVICE_READY_MESSAGE: &str = "Service ready";

const COULD_NOT_OPEN_SOCKET: EventId = EventId::new(0, "CouldNotOpenSocket");
const SAY_HELLO: EventId = EventId::new(1, "Override");
const STREAM_RESET: EventId = EventId::new(2, "StreamReset");
const SERVICE_READY: EventId = EventId::new(3, "ServiceReady");

/// All the log statements this service emits.
pub trait DemoLog {
    /// Use this when a socket can't be opened.
    fn could_not_open_socket(&self, host_name: &str);

    fn say_hello(&self, name: &str);

    /// A peer reset a stream; `error` is the transport error, if any.
    fn stream_reset(
        &self,
        connection_id: &str,
        stream_id: u32,
        elapsed_ms: u64,
        error: Option<&ErrorRef>,
    );

    fn service_ready(&self);
}

pub fn could_not_open_socket<L: Logger + ?Sized>(logger: &L, host_name: &str) {
    if logger.is_enabled(LogLevel::Critical) {
        let state = StateHolder1::new(
            |s, _| format!("Could not open socket to `{}`", s.value1()),
            None,
            ["hostName"],
            host_name,
        );
        logger.record(LogLevel::Critical, COULD_NOT_OPEN_SOCKET, &state);
    }
}

pub fn say_hello<L: Logger + ?Sized>(logger: &L, name: &str) {
    gate::log(logger, LogLevel::Critical, SAY_HELLO, || {
        StateHolder1::new(
            |s, _| Template::new(SAY_HELLO_MESSAGE).render(s),
            None,
            ["name"],
            name,
        )
    });
}

pub fn stream_reset<L: Logger + ?Sized>(
    logger: &L,
    connection_id: &str,
    stream_id: u32,
    elapsed_ms: u64,
    error: Option<&ErrorRef>,
) {
    gate::log(logger, LogLevel::Warning, STREAM_RESET, || {
        StateHolder3::new(
            |s, _| Template::new(STREAM_RESET_MESSAGE).render(s),
            error,
            ["connectionId", "streamId", "elapsedMs"],
            connection_id,
            stream_id,
            elapsed_ms,
        )
    });
}

pub fn service_ready<L: Logger + ?Sized>(logger: &L) {
    gate::log(logger, LogLevel::Information, SERVICE_READY, || {
        StateHolder0::literal(SERVICE_READY_MESSAGE, None)
    });
}

/// [`DemoLog`] bound to one logger.
#[derive(Debug, Clone)]
pub struct Wrapped<L> {
    logger: L,
}

pub fn wrap<L: Logger>(logger: L) -> Wrapped<L> {
    Wrapped { logger }
}

impl<L: Logger> Wrapped<L> {
    pub fn logger(&self) -> &L {
        &self.logger
    }
}

impl<L: Logger> DemoLog for Wrapped<L> {
    fn could_not_open_socket(&self, host_name: &str) {
        could_not_open_socket(&self.logger, host_name)
    }

    fn say_hello(&self, name: &str) {
        say_hello(&self.logger, name)
    }

    fn stream_reset(
        &self,
        connection_id: &str,
        stream_id: u32,
        elapsed_ms: u64,
        error: Option<&ErrorRef>,
    ) {
        stream_reset(&self.logger, connection_id, stream_id, elapsed_ms, error)
    }

    fn service_ready(&self) {
        service_ready(&self.logger)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use lm_core::capture::MemoryLogger;

    use super::*;

    #[test]
    fn socket_failure_renders_host() {
        let logger = MemoryLogger::default();
        could_not_open_socket(&logger, "microsoft.com");

        let records = logger.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Critical);
        assert_eq!(records[0].event_id, COULD_NOT_OPEN_SOCKET);
        assert_eq!(records[0].message, "Could not open socket to `microsoft.com`");
        assert_eq!(records[0].entry("hostName"), Some("microsoft.com"));
    }

    #[test]
    fn wrapper_emits_the_same_records() {
        let direct = MemoryLogger::default();
        could_not_open_socket(&direct, "microsoft.com");

        let wrapped = wrap(MemoryLogger::default());
        wrapped.could_not_open_socket("microsoft.com");

        assert_eq!(direct.records(), wrapped.logger().records());
    }

    #[test]
    fn say_hello_uses_overridden_event_name() {
        let logger = MemoryLogger::default();
        say_hello(&logger, "David");
        let records = logger.take();
        assert_eq!(records[0].event_id.name(), Some("Override"));
        assert_eq!(records[0].message, "Hello David");
    }

    #[test]
    fn stream_reset_forwards_error() {
        let logger = MemoryLogger::default();
        let err = io::Error::new(io::ErrorKind::ConnectionReset, "peer went away");
        stream_reset(&logger, "abc123", 4, 250, Some(&err));

        let records = logger.take();
        assert_eq!(
            records[0].message,
            "Stream 4 on connection abc123 reset after 250 ms"
        );
        assert_eq!(records[0].error.as_deref(), Some("peer went away"));
        let names: Vec<&str> = records[0].entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["connectionId", "streamId", "elapsedMs"]);
    }

    #[test]
    fn disabled_levels_record_nothing() {
        let logger = MemoryLogger::new(LogLevel::Error);
        service_ready(&logger);
        stream_reset(&logger, "abc123", 4, 1, None);
        assert!(logger.is_empty());

        could_not_open_socket(&logger, "microsoft.com");
        assert_eq!(logger.len(), 1);
    }

    #[test]
    fn parameterless_statement_renders_literal() {
        let logger = MemoryLogger::default();
        wrap(&logger).service_ready();
        let records = logger.take();
        assert_eq!(records[0].message, SERVICE_READY_MESSAGE);
        assert!(records[0].entries.is_empty());
    }
}
