use crate::config::{CliConfig, OutputFormat};
use crate::reader::FileReader;
use anyhow::Result;
use idea_extract::{ExtractionResult, Extractor};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Where one raw model response comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn label(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.to_string_lossy().to_string(),
        }
    }

    async fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => FileReader::read_stdin().await,
            Source::File(path) => FileReader::read_file(path).await,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SourcedResult {
    pub source: String,
    pub result: ExtractionResult,
}

/// Expand directories into their files.
///
/// Returns the sources and whether the output should be a single document
/// (stdin or exactly one file argument) rather than an array.
pub async fn collect_sources(inputs: &[PathBuf]) -> Result<(Vec<Source>, bool)> {
    if inputs.is_empty() {
        return Ok((vec![Source::Stdin], true));
    }

    let mut sources = Vec::new();
    let mut saw_directory = false;

    for path in inputs {
        if path.is_dir() {
            saw_directory = true;
            let files = FileReader::list_directory(path).await?;
            info!(dir = %path.display(), files = files.len(), "Collected responses from directory");
            sources.extend(files.into_iter().map(Source::File));
        } else {
            sources.push(Source::File(path.clone()));
        }
    }

    let single = inputs.len() == 1 && !saw_directory;
    Ok((sources, single))
}

pub async fn extract_sources(
    sources: &[Source],
    extractor: &Extractor,
    fallback_on_error: bool,
) -> Result<Vec<SourcedResult>> {
    let mut results = Vec::with_capacity(sources.len());

    for source in sources {
        let label = source.label();

        let result = match source.read().await {
            Ok(raw) => extractor.extract(&raw),
            Err(e) if fallback_on_error => {
                warn!(source = %label, error = %e, "Read failed, emitting fallback result");
                ExtractionResult::failure(format!("{:#}", e))
            }
            Err(e) => return Err(e),
        };

        info!(source = %label, ideas = result.ideas.len(), "Extracted response");
        results.push(SourcedResult {
            source: label,
            result,
        });
    }

    Ok(results)
}

pub fn render(results: &[SourcedResult], single: bool, output: OutputFormat) -> Result<String> {
    let json = match (single, results) {
        (true, [only]) => to_json(&only.result, output)?,
        _ => to_json(&results, output)?,
    };
    Ok(json)
}

fn to_json<T: Serialize + ?Sized>(value: &T, output: OutputFormat) -> Result<String> {
    let json = match output {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

pub async fn run(config: &CliConfig) -> Result<String> {
    if config.reads_stdin() {
        info!("No inputs given, reading response from stdin");
    }

    let (sources, single) = collect_sources(&config.inputs).await?;
    let extractor = Extractor::new();

    let results = extract_sources(&sources, &extractor, config.fallback_on_error).await?;
    render(&results, single, config.output)
}
