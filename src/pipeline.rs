use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::model::Export;
use crate::export::{flatten, JsonExporter};
use crate::ocr::{OcrPredictor, PredictorConfig};
use crate::path;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Image path as given by the user, relative or absolute.
    pub input: String,
    /// Where to write the raw export, if anywhere.
    pub json_out: Option<String>,
    pub predictor: PredictorConfig,
    pub print_text: bool,
}

impl PipelineConfig {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            json_out: None,
            predictor: PredictorConfig::default(),
            print_text: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("OCR failed: {:#}", .0)]
    Ocr(anyhow::Error),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::NotFound(_) | RunError::NotAFile(_) => 2,
            RunError::Ocr(_) => 1,
        }
    }
}

/// Resolves and checks the input, runs the predictor, then writes the JSON
/// export and the flattened text as configured. Text goes to `out`.
pub fn run<P, W>(config: &PipelineConfig, predictor: &P, out: &mut W) -> Result<Export, RunError>
where
    P: OcrPredictor + ?Sized,
    W: Write,
{
    let image = path::resolve(&config.input);
    validate_input(&image)?;

    recognize(config, &image, predictor, out).map_err(RunError::Ocr)
}

/// Follows symlinks; a dangling link counts as not found.
pub fn validate_input(image: &Path) -> Result<(), RunError> {
    if !image.exists() {
        return Err(RunError::NotFound(image.to_path_buf()));
    }
    if !image.is_file() {
        return Err(RunError::NotAFile(image.to_path_buf()));
    }
    Ok(())
}

fn recognize<P, W>(config: &PipelineConfig, image: &Path, predictor: &P, out: &mut W) -> Result<Export>
where
    P: OcrPredictor + ?Sized,
    W: Write,
{
    let export = predictor.predict(&[image.to_path_buf()], &config.predictor)?;
    info!(pages = export.pages().len(), "OCR finished");

    if let Some(json_out) = config.json_out.as_deref().filter(|p| !p.is_empty()) {
        let exporter = JsonExporter::new(path::resolve(json_out));
        exporter.export(&export)?;
    }

    if config.print_text {
        let text = flatten(&export);
        debug!(chars = text.len(), "flattened export");
        writeln!(out, "{text}").with_context(|| "failed to write extracted text")?;
        out.flush().with_context(|| "failed to write extracted text")?;
    }

    Ok(export)
}
