use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use lm_config::{LmConfig, LogFormat};
use lm_demo::catalog;
use lm_demo::events::{self, DemoLog};
use lm_runtime::TracingLogger;
use lm_runtime::tracing_init::init_tracing;

#[derive(Parser)]
#[command(name = "lm-demo", about = "Allocation-free structured logging demo")]
struct Cli {
    /// Path to lm.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Override the output format ("plain" or "json")
    #[arg(long, global = true)]
    format: Option<String>,
    /// Override the filter directive (e.g. "debug", "error,lm=trace")
    #[arg(long, global = true)]
    level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the sample events through the configured subscriber
    Run {
        /// Host reported by the socket failure event
        #[arg(long, default_value = "microsoft.com")]
        host: String,
        /// Name greeted by the hello event
        #[arg(long, default_value = "David")]
        name: String,
    },
    /// Print the declared log statements as TOML
    Catalog,
}

fn parse_format(value: &str) -> Result<LogFormat> {
    match value {
        "plain" => Ok(LogFormat::Plain),
        "json" => Ok(LogFormat::Json),
        other => anyhow::bail!("invalid --format '{other}' (expected plain or json)"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, base_dir) = match cli.config {
        Some(path) => {
            let path = path
                .canonicalize()
                .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
            let config = LmConfig::load(&path)?;
            let base_dir = path
                .parent()
                .map(PathBuf::from)
                .ok_or_else(|| anyhow::anyhow!("config path has no parent directory"))?;
            (config, base_dir)
        }
        None => (LmConfig::default(), std::env::current_dir()?),
    };
    if let Some(format) = cli.format {
        config.logging.format = parse_format(&format)?;
    }
    if let Some(level) = cli.level {
        config.logging.level = level;
    }

    match cli.command {
        Commands::Run { host, name } => {
            let _guard = init_tracing(&config.logging, &base_dir)?;
            let logger = TracingLogger::from_config(&config.logger);
            tracing::info!(
                format = ?config.logging.format,
                min_level = %config.logger.min_level,
                "lm-demo started"
            );

            // free functions, one per declaration
            events::could_not_open_socket(&logger, &host);

            // the same statements through the declaration trait
            let log = events::wrap(&logger);
            log.could_not_open_socket(&host);
            log.say_hello(&name);

            let reset = io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer");
            log.stream_reset("abc123", 4, 250, Some(&reset));
            log.service_ready();
        }
        Commands::Catalog => {
            print!("{}", catalog::to_toml()?);
        }
    }

    Ok(())
}
