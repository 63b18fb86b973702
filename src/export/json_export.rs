use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::model::Export;

/// Writes the raw export as indented UTF-8 JSON, creating parent directories.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn export(&self, export: &Export) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        let file = File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, export)
            .with_context(|| format!("failed to write JSON to {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("failed to write JSON to {}", self.path.display()))?;

        info!(path = %self.path.display(), "wrote OCR export");
        Ok(())
    }
}
