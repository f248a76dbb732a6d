//! Validation of the command line request into a concrete conversion.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, ToolError};
use crate::format::FileFormat;

/// Language used when none is requested.
pub const DEFAULT_LANGUAGE: &str = "EN";
/// Workbook file name used when no output is given.
pub const DEFAULT_WORKBOOK_NAME: &str = "translations.xlsx";

/// Raw options as collected from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionRequest {
    pub inputs: Vec<PathBuf>,
    pub outputs: Vec<PathBuf>,
    pub languages: Vec<String>,
    pub special_strings: Vec<String>,
}

/// A validated conversion, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionPlan {
    JsonToExcel {
        inputs: Vec<PathBuf>,
        output: PathBuf,
        languages: Vec<String>,
        special_strings: Vec<String>,
    },
    ExcelToJson {
        input: PathBuf,
        output_dir: PathBuf,
    },
}

/// Checks input cardinality and formats and fills in defaults.
pub fn resolve(request: ConversionRequest) -> Result<ConversionPlan> {
    let ConversionRequest {
        inputs,
        outputs,
        languages,
        special_strings,
    } = request;

    let first = inputs.first().ok_or(ToolError::NoInputFiles)?;
    if outputs.len() > 1 {
        return Err(ToolError::MultipleOutputs);
    }
    let output = outputs.into_iter().next();

    match FileFormat::detect(first) {
        FileFormat::Json => {
            if inputs.len() > 1 {
                check_json_paths(&inputs)?;
            }

            let output = match output {
                Some(path) => ensure_xlsx_output(path)?,
                None => default_workbook_path(first),
            };

            let languages = if languages.is_empty() {
                vec![DEFAULT_LANGUAGE.to_string()]
            } else {
                languages
            };

            Ok(ConversionPlan::JsonToExcel {
                inputs,
                output,
                languages,
                special_strings,
            })
        }
        FileFormat::Xlsx => {
            if inputs.len() > 1 {
                return Err(ToolError::MultipleWorkbooks);
            }
            if !languages.is_empty() {
                warn!("-l option has no effect when converting from XLSX -> JSON");
            }
            if !special_strings.is_empty() {
                warn!("-s option has no effect when converting from XLSX -> JSON");
            }

            let mut inputs = inputs;
            Ok(ConversionPlan::ExcelToJson {
                input: inputs.remove(0),
                output_dir: output.unwrap_or_else(|| PathBuf::from(".")),
            })
        }
        FileFormat::Other(tag) => Err(ToolError::UnsupportedFormat(tag)),
    }
}

fn check_json_paths(inputs: &[PathBuf]) -> Result<()> {
    let offending: Vec<String> = inputs
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .filter(|path| !path.contains(".json"))
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(ToolError::InvalidJsonPaths(offending.join(", ")))
    }
}

fn ensure_xlsx_output(path: PathBuf) -> Result<PathBuf> {
    if FileFormat::detect(&path) == FileFormat::Xlsx {
        return Ok(path);
    }

    let text = path.to_string_lossy().into_owned();
    if text.contains('.') {
        return Err(ToolError::WrongOutputFormat(path));
    }

    warn!("adding '.xlsx' to output file");
    Ok(PathBuf::from(format!("{text}.xlsx")))
}

fn default_workbook_path(first_input: &Path) -> PathBuf {
    first_input
        .parent()
        .map(|parent| parent.join(DEFAULT_WORKBOOK_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK_NAME))
}
