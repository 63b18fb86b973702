use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::core::model::Export;
use crate::ocr::{OcrPredictor, PredictorConfig};

const BRIDGE_SCRIPT: &str = include_str!("doctr_bridge.py");
const ERROR_PREFIX: &str = "DOCTR_ERROR: ";

pub const DEFAULT_PYTHON: &str = "python3";

/// Runs docTR inside a Python interpreter and reads the export back as JSON.
///
/// The interpreter must have `python-doctr` installed. Model download, load and
/// inference all happen in the child process; this call blocks until it exits.
#[derive(Debug, Clone)]
pub struct DoctrBridge {
    python: PathBuf,
}

impl DoctrBridge {
    pub fn new() -> Self {
        Self {
            python: PathBuf::from(DEFAULT_PYTHON),
        }
    }

    pub fn with_python(mut self, python: PathBuf) -> Self {
        self.python = python;
        self
    }

    fn script_args(images: &[PathBuf], config: &PredictorConfig) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-c".into(),
            BRIDGE_SCRIPT.into(),
            "--det-arch".into(),
            config.det_arch.clone().into(),
            "--reco-arch".into(),
            config.reco_arch.clone().into(),
        ];
        if !config.pretrained {
            args.push("--no-pretrained".into());
        }
        // image paths after `--` so a leading dash is never read as an option
        args.push("--".into());
        args.extend(images.iter().map(|image| image.as_os_str().to_os_string()));
        args
    }
}

impl Default for DoctrBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrPredictor for DoctrBridge {
    fn predict(&self, images: &[PathBuf], config: &PredictorConfig) -> Result<Export> {
        if images.is_empty() {
            anyhow::bail!("no input images given");
        }

        info!(
            det_arch = %config.det_arch,
            reco_arch = %config.reco_arch,
            images = images.len(),
            "running docTR predictor"
        );

        let output = Command::new(&self.python)
            .args(Self::script_args(images, config))
            .output()
            .with_context(|| {
                format!(
                    "failed to invoke python interpreter {}",
                    self.python.display()
                )
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            debug!(%stderr, "docTR bridge stderr");
            anyhow::bail!(bridge_error_message(&stderr, &output.status.to_string()));
        }

        let value: Value = serde_json::from_slice(&output.stdout)
            .with_context(|| "failed to parse docTR export JSON")?;
        if !value.is_object() {
            anyhow::bail!("docTR export is not a JSON object");
        }

        let export = Export::new(value);
        debug!(
            pages = export.pages().len(),
            words = export.word_count(),
            "docTR export received"
        );
        Ok(export)
    }
}

/// Picks the most useful line out of the bridge's stderr.
///
/// The script reports its own failures on a prefixed line; anything else (a crash
/// before the script got going, a missing module) falls back to the last line
/// written.
fn bridge_error_message(stderr: &str, status: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if let Some(message) = lines
        .iter()
        .rev()
        .find_map(|line| line.strip_prefix(ERROR_PREFIX))
    {
        return message.to_string();
    }

    match lines.last() {
        Some(line) => line.to_string(),
        None => format!("docTR bridge exited with {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_reported_error_line() {
        let stderr = "Downloading weights...\nDOCTR_ERROR: unknown architecture 'foo'\n";
        assert_eq!(
            bridge_error_message(stderr, "exit status: 1"),
            "unknown architecture 'foo'"
        );
    }

    #[test]
    fn falls_back_to_last_stderr_line() {
        let stderr = "Traceback (most recent call last):\n  ...\nModuleNotFoundError: No module named 'doctr'\n\n";
        assert_eq!(
            bridge_error_message(stderr, "exit status: 1"),
            "ModuleNotFoundError: No module named 'doctr'"
        );
    }

    #[test]
    fn silent_failure_reports_status() {
        assert_eq!(
            bridge_error_message("  \n", "exit status: 9"),
            "docTR bridge exited with exit status: 9"
        );
    }

    #[test]
    fn script_args_carry_config_and_images() {
        let mut config = PredictorConfig::new("linknet_resnet18", "parseq");
        config.pretrained = false;
        let images = vec![PathBuf::from("/tmp/-odd.png")];

        let args = DoctrBridge::script_args(&images, &config);
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[0], "-c");
        assert!(args[1].contains("ocr_predictor"));
        assert_eq!(
            &args[2..],
            [
                "--det-arch",
                "linknet_resnet18",
                "--reco-arch",
                "parseq",
                "--no-pretrained",
                "--",
                "/tmp/-odd.png"
            ]
        );
    }

    #[test]
    fn missing_interpreter_is_an_error() {
        let bridge = DoctrBridge::new().with_python(PathBuf::from("/nonexistent/python-for-doctr"));
        let err = bridge
            .predict(&[PathBuf::from("page.png")], &PredictorConfig::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to invoke python interpreter"));
    }

    #[test]
    fn empty_image_list_is_rejected() {
        let err = DoctrBridge::new()
            .predict(&[], &PredictorConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "no input images given");
    }
}
