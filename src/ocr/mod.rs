pub mod bridge;

use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::Export;

pub use bridge::DoctrBridge;

pub const DEFAULT_DET_ARCH: &str = "db_resnet50";
pub const DEFAULT_RECO_ARCH: &str = "crnn_vgg16_bn";

/// Model selection handed to the predictor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    pub det_arch: String,
    pub reco_arch: String,
    pub pretrained: bool,
}

impl PredictorConfig {
    pub fn new(det_arch: impl Into<String>, reco_arch: impl Into<String>) -> Self {
        Self {
            det_arch: det_arch.into(),
            reco_arch: reco_arch.into(),
            pretrained: true,
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DET_ARCH, DEFAULT_RECO_ARCH)
    }
}

/// An OCR engine that turns image files into an [`Export`].
///
/// Every image becomes one page of the export, in the given order.
pub trait OcrPredictor {
    fn predict(&self, images: &[PathBuf], config: &PredictorConfig) -> Result<Export>;
}
