use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Empty means read a single response from stdin
    pub inputs: Vec<PathBuf>,
    pub output: OutputFormat,
    pub log_format: LogFormat,
    pub fallback_on_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Pretty,  // Indented JSON
    Compact, // One line per document
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: OutputFormat::Pretty,
            log_format: LogFormat::Text,
            fallback_on_error: false,
        }
    }
}

impl CliConfig {
    pub fn reads_stdin(&self) -> bool {
        self.inputs.is_empty()
    }
}
