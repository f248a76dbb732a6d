use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;
use i18n_sheets::plan::{self, ConversionRequest};
use i18n_sheets::{Result, ToolError, sync};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            _ => {
                let _ = error.print();
                std::process::exit(1);
            }
        },
    };

    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let conversion = plan::resolve(cli.into_request())?;

    let inputs: Vec<&PathBuf> = match &conversion {
        plan::ConversionPlan::JsonToExcel { inputs, .. } => inputs.iter().collect(),
        plan::ConversionPlan::ExcelToJson { input, .. } => vec![input],
    };
    if let Some(missing) = inputs.into_iter().find(|path| !path.exists()) {
        return Err(ToolError::MissingInput(missing.clone()));
    }

    sync::run(&conversion)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert nested JSON translation files to an XLSX workbook and back."
)]
struct Cli {
    /// Translation files (.json) or a single workbook (.xlsx).
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Special strings which will be switched for keys (only for JSON -> XLSX).
    #[arg(short = 's', value_name = "STRING")]
    special_strings: Vec<String>,

    /// Output file name (JSON -> XLSX) / directory (XLSX -> JSON).
    #[arg(short = 'o', value_name = "PATH")]
    output: Vec<PathBuf>,

    /// Desired languages [default: EN].
    #[arg(short = 'l', value_name = "LANG")]
    languages: Vec<String>,
}

impl Cli {
    fn into_request(self) -> ConversionRequest {
        ConversionRequest {
            inputs: self.files,
            outputs: self.output,
            languages: self.languages,
            special_strings: self.special_strings,
        }
    }
}
