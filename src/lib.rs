pub mod core;
pub mod export;
pub mod logging;
pub mod ocr;
pub mod path;
pub mod pipeline;

pub use crate::core::model::Export;
pub use export::flatten;
pub use pipeline::{run, PipelineConfig, RunError};
