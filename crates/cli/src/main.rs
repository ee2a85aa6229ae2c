mod config;
mod reader;
mod run;

use anyhow::Result;
use clap::Parser;
use config::{CliConfig, LogFormat, OutputFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract structured business ideas from raw text-generation responses
#[derive(Parser, Debug)]
#[command(name = "idea-extract", version)]
struct Cli {
    /// Response files or directories of them; reads stdin when omitted
    inputs: Vec<PathBuf>,

    /// JSON layout of the printed result
    #[arg(long, value_enum, env = "IDEA_OUTPUT", default_value_t = OutputFormat::Pretty)]
    output: OutputFormat,

    /// Log line format (logs go to stderr)
    #[arg(long, value_enum, env = "IDEA_LOG_FORMAT", default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Emit an error record instead of aborting when an input cannot be read
    #[arg(long)]
    fallback_on_error: bool,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            inputs: cli.inputs,
            output: cli.output,
            log_format: cli.log_format,
            fallback_on_error: cli.fallback_on_error,
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = CliConfig::from(Cli::parse());
    init_tracing(config.log_format);

    tracing::debug!(?config, "Starting extraction");

    let output = run::run(&config).await?;
    println!("{}", output);

    Ok(())
}
