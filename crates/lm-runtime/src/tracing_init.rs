use std::fmt::{self as stdfmt, Write as _};
use std::path::Path;

use anyhow::Result;
use lm_config::{LogFormat, LoggingConfig};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Type-erased layer, so console and file outputs of either format can share
/// one `Vec`.
pub type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// EventFields: event and span fields without the identity pair
// ---------------------------------------------------------------------------

/// Field formatter for plain output.
///
/// Writes the message bare and every other field as `name=value`.
/// `event_id` and `event_name` are skipped since [`EventFormat`] already
/// printed them as the prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventFields;

impl<'writer> fmt::FormatFields<'writer> for EventFields {
    fn format_fields<R: RecordFields>(
        &self,
        writer: fmt::format::Writer<'writer>,
        fields: R,
    ) -> stdfmt::Result {
        let mut visitor = FieldWriter {
            writer,
            seen: false,
            result: Ok(()),
        };
        fields.record(&mut visitor);
        visitor.result
    }
}

/// Same output as [`EventFields`]; a distinct type so the file layer keeps
/// its own formatted span fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFields(EventFields);

impl<'writer> fmt::FormatFields<'writer> for FileFields {
    fn format_fields<R: RecordFields>(
        &self,
        writer: fmt::format::Writer<'writer>,
        fields: R,
    ) -> stdfmt::Result {
        self.0.format_fields(writer, fields)
    }
}

struct FieldWriter<'writer> {
    writer: fmt::format::Writer<'writer>,
    seen: bool,
    result: stdfmt::Result,
}

impl FieldWriter<'_> {
    fn write(&mut self, name: &str, value: stdfmt::Arguments<'_>) {
        if self.result.is_err() || name == "event_id" || name == "event_name" {
            return;
        }
        let sep = if self.seen { " " } else { "" };
        self.seen = true;
        self.result = if name == "message" {
            write!(self.writer, "{sep}{value}")
        } else {
            write!(self.writer, "{sep}{name}={value}")
        };
    }
}

impl Visit for FieldWriter<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.write("message", format_args!("{value}"));
        } else {
            self.write(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn stdfmt::Debug) {
        self.write(field.name(), format_args!("{value:?}"));
    }
}

// ---------------------------------------------------------------------------
// EventFormat: `[name#id]` prefix in front of the stock formatter
// ---------------------------------------------------------------------------

/// Plain-text formatter for structured call sites.
///
/// ```text
/// [CouldNotOpenSocket#0] 2026-10-17T09:12:44.120Z ERROR lm: Could not open socket to `microsoft.com` severity="critical" state=hostName=microsoft.com
/// ```
///
/// Events without `event_id` / `event_name` (anything logged through plain
/// `tracing` macros) are rendered without the prefix. Timestamp, level,
/// target and span scope come from [`fmt::format::Format`].
#[derive(Debug, Default)]
pub struct EventFormat {
    inner: fmt::format::Format,
}

impl EventFormat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, N> FormatEvent<S, N> for EventFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> fmt::FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        let mut identity = Identity::default();
        event.record(&mut identity);
        if let Some(prefix) = identity.prefix() {
            if writer.has_ansi_escapes() {
                write!(writer, "\x1b[1;36m[{prefix}]\x1b[0m ")?;
            } else {
                write!(writer, "[{prefix}] ")?;
            }
        }
        self.inner.format_event(ctx, writer, event)
    }
}

#[derive(Default)]
struct Identity {
    id: Option<i64>,
    name: Option<String>,
}

impl Identity {
    fn prefix(&self) -> Option<String> {
        match (&self.name, self.id) {
            (Some(name), Some(id)) => Some(format!("{name}#{id}")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(id)) => Some(format!("#{id}")),
            (None, None) => None,
        }
    }
}

impl Visit for Identity {
    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "event_id" {
            self.id = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event_name" {
            self.name = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn stdfmt::Debug) {}
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    let directives = config.directives();
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{directives}': {e}"))
}

fn output_layer<S, W>(format: LogFormat, writer: W, file: bool, filter: EnvFilter) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match (format, file) {
        // JSON keeps event_id / event_name as regular fields; consumers query by key
        (LogFormat::Json, false) => fmt::layer()
            .json()
            .with_target(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
        (LogFormat::Json, true) => fmt::layer()
            .json()
            .fmt_fields(FileFields::default())
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
        (LogFormat::Plain, false) => fmt::layer()
            .event_format(EventFormat::new())
            .fmt_fields(EventFields)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
        (LogFormat::Plain, true) => fmt::layer()
            .event_format(EventFormat::new())
            .fmt_fields(FileFields::default())
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
    }
}

/// Build the stderr layer plus, when `config.file` is set, a non-blocking
/// file layer.
///
/// The returned [`WorkerGuard`] flushes the file writer when dropped.
pub fn build_layers<S>(
    config: &LoggingConfig,
    base_dir: &Path,
) -> Result<(Vec<BoxedLayer<S>>, Option<WorkerGuard>)>
where
    S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
{
    let mut layers = vec![output_layer(
        config.format,
        std::io::stderr,
        false,
        build_filter(config)?,
    )];

    let Some(ref file_path) = config.file else {
        return Ok((layers, None));
    };

    let resolved = if file_path.is_relative() {
        base_dir.join(file_path)
    } else {
        file_path.clone()
    };
    let file_name = resolved
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path has no file name"))?
        .to_os_string();
    let dir = resolved
        .parent()
        .ok_or_else(|| anyhow::anyhow!("log file path has no parent directory"))?;
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    layers.push(output_layer(
        config.format,
        non_blocking,
        true,
        build_filter(config)?,
    ));

    Ok((layers, Some(guard)))
}

/// Initialise the global `tracing` subscriber from [`LoggingConfig`].
///
/// Returns an optional [`WorkerGuard`] that **must** be held until the process
/// exits; dropping it flushes and closes the file writer.
///
/// Precedence: `RUST_LOG` overrides all config-driven directives.
pub fn init_tracing(config: &LoggingConfig, base_dir: &Path) -> Result<Option<WorkerGuard>> {
    let (layers, guard) = build_layers(config, base_dir)?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
    Ok(guard)
}
