use lm_core::{LogLevel, LoggerMessage};
use serde::Serialize;

use crate::events::{
    COULD_NOT_OPEN_SOCKET_MESSAGE, SAY_HELLO_MESSAGE, SERVICE_READY_MESSAGE,
    STREAM_RESET_MESSAGE,
};

/// Descriptors for every statement in [`crate::events`], keyed by the name
/// of the declaring operation.
pub fn declarations() -> Vec<(&'static str, LoggerMessage)> {
    vec![
        (
            "CouldNotOpenSocket",
            LoggerMessage::new(0, LogLevel::Critical, COULD_NOT_OPEN_SOCKET_MESSAGE),
        ),
        (
            "SayHello",
            LoggerMessage::new(1, LogLevel::Critical, SAY_HELLO_MESSAGE).with_event_name("Override"),
        ),
        (
            "StreamReset",
            LoggerMessage::new(2, LogLevel::Warning, STREAM_RESET_MESSAGE),
        ),
        (
            "ServiceReady",
            LoggerMessage::new(3, LogLevel::Information, SERVICE_READY_MESSAGE),
        ),
    ]
}

#[derive(Serialize)]
struct CatalogFile {
    message: Vec<LoggerMessage>,
}

/// Render the catalog as TOML, with every event name resolved.
pub fn to_toml() -> anyhow::Result<String> {
    let message = declarations()
        .into_iter()
        .map(|(operation, mut msg)| {
            msg.event_name = Some(msg.event_name_or(operation).to_string());
            msg
        })
        .collect();
    Ok(toml::to_string(&CatalogFile { message })?)
}
