use std::collections::HashMap;
use std::path::PathBuf;

use lm_core::LogLevel;
use serde::Deserialize;

/// Subscriber bootstrap settings. All fields have defaults so the entire
/// `[logging]` section may be omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global filter directive (e.g. `"info"`, `"debug"`).
    pub level: String,
    /// Per-target overrides, e.g. `{ "lm" = "trace" }` for every structured
    /// call site routed through `TracingLogger`.
    pub modules: HashMap<String, String>,
    /// Optional log file. Relative paths are resolved against the config
    /// file's parent directory.
    pub file: Option<PathBuf>,
    /// Output format: `plain` (human-readable) or `json` (structured).
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            modules: HashMap::new(),
            file: None,
            format: LogFormat::Plain,
        }
    }
}

impl LoggingConfig {
    /// Filter directive string: the global level followed by per-module
    /// overrides, sorted by module for stable output.
    pub fn directives(&self) -> String {
        let mut modules: Vec<_> = self.modules.iter().collect();
        modules.sort();
        let mut directives = self.level.clone();
        for (module, level) in modules {
            directives.push(',');
            directives.push_str(module);
            directives.push('=');
            directives.push_str(level);
        }
        directives
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Json,
}

/// Settings for the logger that structured call sites write to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Events below this level are reported as disabled before any state is
    /// built.
    pub min_level: LogLevel,
    /// Attach the holder's entries as a `state` field.
    pub include_state: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Information,
            include_state: true,
        }
    }
}
