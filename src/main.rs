use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use doctr_ocr::logging::init_logging;
use doctr_ocr::ocr::bridge::{DoctrBridge, DEFAULT_PYTHON};
use doctr_ocr::ocr::{PredictorConfig, DEFAULT_DET_ARCH, DEFAULT_RECO_ARCH};
use doctr_ocr::pipeline::{run, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "doctr_ocr")]
#[command(
    version,
    about = "Run docTR OCR on an image path (relative/absolute). Prints text, optional JSON export.",
    long_about = None
)]
struct Cli {
    /// Path to an image file (relative or absolute)
    image_path: String,

    /// Optional output path to write docTR export JSON (e.g. out.json)
    #[arg(long, value_name = "PATH")]
    json_out: Option<String>,

    /// Detection architecture
    #[arg(long, default_value = DEFAULT_DET_ARCH)]
    det_arch: String,

    /// Recognition architecture
    #[arg(long, default_value = DEFAULT_RECO_ARCH)]
    reco_arch: String,

    /// Do not print extracted text; useful if you only want JSON
    #[arg(long)]
    no_text: bool,

    /// Python interpreter with python-doctr installed
    #[arg(long, env = "DOCTR_PYTHON", default_value = DEFAULT_PYTHON)]
    python: PathBuf,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "DOCTR_OCR_LOG", default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            input: self.image_path.clone(),
            json_out: self.json_out.clone(),
            predictor: PredictorConfig::new(&self.det_arch, &self.reco_arch),
            print_text: !self.no_text,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.log_level) {
        eprintln!("WARNING: logging disabled: {err:#}");
    }

    let bridge = DoctrBridge::new().with_python(cli.python.clone());
    let config = cli.pipeline_config();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&config, &bridge, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
