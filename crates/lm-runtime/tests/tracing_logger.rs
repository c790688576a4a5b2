//! `TracingLogger` routed through real subscriber stacks.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lm_config::{LogFormat, LoggingConfig};
use lm_core::{EventId, LogLevel, Logger, StateHolder1, StateHolder2, Template, gate};
use lm_runtime::tracing_init::{EventFields, EventFormat, build_layers};
use lm_runtime::{TARGET, TracingLogger};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> SharedBuf {
        self.clone()
    }
}

const COULD_NOT_OPEN_SOCKET: EventId = EventId::new(0, "CouldNotOpenSocket");
const STREAM_RESET: EventId = EventId::new(2, "StreamReset");

fn could_not_open_socket(logger: &impl Logger, host_name: &str) {
    gate::log(logger, LogLevel::Critical, COULD_NOT_OPEN_SOCKET, || {
        StateHolder1::new(
            |s, _| Template::new("Could not open socket to `{hostName}`").render(s),
            None,
            ["hostName"],
            host_name,
        )
    });
}

#[test]
fn plain_output_carries_identity_prefix() {
    let buf = SharedBuf::default();
    let subscriber = Registry::default().with(
        fmt::layer()
            .event_format(EventFormat::new())
            .fmt_fields(EventFields)
            .with_ansi(false)
            .with_writer(buf.clone())
            .with_filter(LevelFilter::TRACE),
    );

    tracing::subscriber::with_default(subscriber, || {
        could_not_open_socket(&TracingLogger::new(LogLevel::Trace), "microsoft.com");
    });

    let out = buf.contents();
    assert!(out.starts_with("[CouldNotOpenSocket#0] "), "{out}");
    assert!(out.contains("ERROR"), "{out}");
    assert!(out.contains("lm: Could not open socket to `microsoft.com`"), "{out}");
    assert!(!out.contains("event_id="), "{out}");
    assert!(out.contains("state=hostName=microsoft.com"), "{out}");
    assert!(out.contains(r#"severity="critical""#), "{out}");
}

#[test]
fn json_output_keeps_fields() {
    let buf = SharedBuf::default();
    let subscriber = Registry::default().with(
        fmt::layer()
            .json()
            .with_target(false)
            .with_writer(buf.clone())
            .with_filter(LevelFilter::TRACE),
    );

    tracing::subscriber::with_default(subscriber, || {
        let logger = TracingLogger::new(LogLevel::Trace);
        gate::log(&logger, LogLevel::Warning, STREAM_RESET, || {
            StateHolder2::new(
                |s, _| Template::new("stream {streamId} on {connectionId} reset").render(s),
                None,
                ["connectionId", "streamId"],
                "abc123",
                4_i32,
            )
        });
    });

    let out = buf.contents();
    let line: serde_json::Value = serde_json::from_str(out.lines().next().unwrap()).unwrap();
    assert_eq!(line["level"], "WARN");
    assert_eq!(line["fields"]["message"], "stream 4 on abc123 reset");
    assert_eq!(line["fields"]["event_id"], 2);
    assert_eq!(line["fields"]["event_name"], "StreamReset");
    assert_eq!(line["fields"]["state"], "connectionId=abc123 streamId=4");
}

#[test]
fn subscriber_filter_disables_before_construction() {
    let buf = SharedBuf::default();
    let subscriber = Registry::default().with(
        fmt::layer()
            .event_format(EventFormat::new())
            .with_ansi(false)
            .with_writer(buf.clone())
            .with_filter(LevelFilter::WARN),
    );

    tracing::subscriber::with_default(subscriber, || {
        let logger = TracingLogger::new(LogLevel::Trace).with_state(false);
        assert!(!logger.is_enabled(LogLevel::Information));
        assert!(logger.is_enabled(LogLevel::Critical));

        let mut built = false;
        gate::log(&logger, LogLevel::Debug, STREAM_RESET, || {
            built = true;
            StateHolder1::new(|_, _| String::from("never"), None, ["x"], 1_i32)
        });
        assert!(!built);
    });

    assert!(!buf.contents().contains("never"));
}

#[test]
fn file_layer_writes_through_worker_guard() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        level: "trace".to_string(),
        file: Some("logs/lm.log".into()),
        format: LogFormat::Plain,
        ..LoggingConfig::default()
    };
    let (layers, guard) = build_layers::<Registry>(&config, dir.path()).unwrap();
    let guard = guard.expect("file layer returns a guard");

    tracing::subscriber::with_default(Registry::default().with(layers), || {
        could_not_open_socket(&TracingLogger::new(LogLevel::Trace), "example.org");
    });
    drop(guard);

    let written = std::fs::read_to_string(dir.path().join("logs/lm.log")).unwrap();
    assert!(written.starts_with("[CouldNotOpenSocket#0] "), "{written}");
    assert!(written.contains("Could not open socket to `example.org`"), "{written}");
    assert!(!written.contains("event_name="), "{written}");
}

#[test]
fn invalid_directive_is_rejected() {
    if std::env::var("RUST_LOG").is_ok() {
        return;
    }
    let config = LoggingConfig {
        level: "info,lm=loud".to_string(),
        ..LoggingConfig::default()
    };
    let Err(err) = build_layers::<Registry>(&config, Path::new(".")) else {
        panic!("directive accepted");
    };
    assert!(err.to_string().contains("invalid log filter"));
}

#[test]
fn module_directive_enables_structured_target() {
    if std::env::var("RUST_LOG").is_ok() {
        return;
    }
    let config = LoggingConfig {
        level: "error".to_string(),
        modules: HashMap::from([(TARGET.to_string(), "trace".to_string())]),
        ..LoggingConfig::default()
    };
    let (layers, _guard) = build_layers::<Registry>(&config, Path::new(".")).unwrap();

    tracing::subscriber::with_default(Registry::default().with(layers), || {
        let logger = TracingLogger::new(LogLevel::Trace);
        assert!(logger.is_enabled(LogLevel::Warning));
        assert!(logger.is_enabled(LogLevel::Trace));
        assert!(!tracing::enabled!(tracing::Level::WARN));
    });
}
