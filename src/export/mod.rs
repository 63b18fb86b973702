pub mod json_export;
pub mod text_export;

pub use json_export::JsonExporter;
pub use text_export::flatten;
