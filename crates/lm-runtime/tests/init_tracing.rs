//! Global subscriber installation. Kept in its own test binary because the
//! global default can only be set once per process.

use lm_config::{LogFormat, LoggingConfig};
use lm_core::{EventId, LogLevel, StateHolder0, gate};
use lm_runtime::TracingLogger;
use lm_runtime::tracing_init::init_tracing;

#[test]
fn installs_once_and_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        level: "info".to_string(),
        file: Some("lm.jsonl".into()),
        format: LogFormat::Json,
        ..LoggingConfig::default()
    };

    let guard = init_tracing(&config, dir.path()).unwrap();
    assert!(guard.is_some());
    assert!(init_tracing(&LoggingConfig::default(), dir.path()).is_err());

    let logger = TracingLogger::new(LogLevel::Information);
    gate::log(&logger, LogLevel::Warning, EventId::new(5, "Ready"), || {
        StateHolder0::literal("service ready", None)
    });
    drop(guard);

    let written = std::fs::read_to_string(dir.path().join("lm.jsonl")).unwrap();
    let line: serde_json::Value = serde_json::from_str(written.lines().next().unwrap()).unwrap();
    assert_eq!(line["fields"]["message"], "service ready");
    assert_eq!(line["fields"]["event_name"], "Ready");
}
