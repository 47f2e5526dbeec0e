use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use fathom_evaluator::config::EvaluatorConfig;

/// Loads the evaluator configuration, or the defaults when no path is given.
///
/// # Errors
///
/// Returns error if the file cannot be read, parsed, or holds unusable values
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EvaluatorConfig> {
    let Some(path) = path else {
        return Ok(EvaluatorConfig::default());
    };
    let file = File::open(path)
        .with_context(|| format!("Failed to open evaluator config: {}", path.display()))?;
    let config: EvaluatorConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse evaluator config: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid evaluator config: {}", path.display()))?;
    tracing::info!(path = %path.display(), "evaluator config loaded");
    Ok(config)
}

/// Writes `config` as pretty JSON to `path`, or to stdout when no path is given.
pub fn save_config(config: &EvaluatorConfig, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create config file: {}", path.display()))?;
            write_config(config, BufWriter::new(file))
                .with_context(|| format!("Failed to write config to {}", path.display()))
        }
        None => {
            write_config(config, io::stdout().lock()).context("Failed to write config to stdout")
        }
    }
}

fn write_config<W>(config: &EvaluatorConfig, mut writer: W) -> anyhow::Result<()>
where
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, config)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
