pub mod config;
pub mod logging;

pub use config::LmConfig;
pub use logging::{LogFormat, LoggerConfig, LoggingConfig};
