use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::batch;
use crate::error::{Result, ToolError};
use crate::flatten::{build_workbook, unflatten};
use crate::io::{excel_read, excel_write, json};
use crate::model::{LanguageBundle, Namespace, SheetTranslations};
use crate::plan::ConversionPlan;

/// Runs a validated conversion.
pub fn run(plan: &ConversionPlan) -> Result<()> {
    match plan {
        ConversionPlan::JsonToExcel {
            inputs,
            output,
            languages,
            special_strings,
        } => json_to_excel(inputs, output, languages, special_strings),
        ConversionPlan::ExcelToJson { input, output_dir } => {
            excel_to_json(input, output_dir).map(|_| ())
        }
    }
}

/// Converts translation files into one workbook with a sheet per file.
#[instrument(
    level = "info",
    skip_all,
    fields(inputs = inputs.len(), output = %output.display())
)]
pub fn json_to_excel(
    inputs: &[PathBuf],
    output: &Path,
    languages: &[String],
    special_strings: &[String],
) -> Result<()> {
    for input in inputs {
        info!(input = %input.display(), "converting JSON to XLSX");
    }

    let namespaces = batch::run_all(
        inputs,
        |path| path.display().to_string(),
        |path| json::read_namespace(path),
    )?;
    let workbook = build_workbook(&namespaces, languages, special_strings);
    debug!(sheet_count = workbook.tables.len(), "workbook constructed");

    excel_write::write_workbook(output, &workbook)?;
    info!(output = %output.display(), "file conversion is successful");
    Ok(())
}

/// Converts a workbook into one directory per language holding one JSON file
/// per sheet. Returns the written file paths.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output_dir.display())
)]
pub fn excel_to_json(input: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    info!("converting XLSX to JSON");
    let sheets = excel_read::read_translations(input)?;
    info!(sheet_count = sheets.len(), "read sheets from workbook");
    let bundles = group_by_language(sheets);

    let directories = bundles
        .iter()
        .map(|bundle| language_directory(output_dir, &bundle.language))
        .collect::<Result<Vec<_>>>()?;
    for directory in &directories {
        info!(directory = %directory.display(), "creating language directory");
    }
    batch::run_all(
        &directories,
        |directory| directory.display().to_string(),
        |directory| Ok(fs::create_dir_all(directory)?),
    )?;

    let files: Vec<(PathBuf, &Namespace)> = bundles
        .iter()
        .zip(&directories)
        .flat_map(|(bundle, directory)| {
            bundle.namespaces.iter().map(move |namespace| {
                (directory.join(format!("{}.json", namespace.name)), namespace)
            })
        })
        .collect();
    batch::run_all(
        &files,
        |(path, _)| path.display().to_string(),
        |(path, namespace)| {
            info!(file = %path.display(), "writing translation file");
            json::write_tree(path, &namespace.tree)
        },
    )?;

    info!(file_count = files.len(), "file conversion is successful");
    Ok(files.into_iter().map(|(path, _)| path).collect())
}

/// Resolves the directory of one language below `output_dir`. Labels that
/// would escape `output_dir` are rejected.
fn language_directory(output_dir: &Path, language: &str) -> Result<PathBuf> {
    if language.contains(['/', '\\']) || language == "." || language == ".." {
        return Err(ToolError::InvalidWorkbook(format!(
            "language label '{language}' is not a valid directory name"
        )));
    }
    Ok(output_dir.join(language))
}

/// Regroups sheet columns by language. Languages keep their order of first
/// appearance across sheets; when one sheet repeats a language, the later
/// column replaces the earlier one.
pub fn group_by_language(sheets: Vec<SheetTranslations>) -> Vec<LanguageBundle> {
    let mut bundles: Vec<LanguageBundle> = Vec::new();

    for sheet in sheets {
        for column in sheet.columns {
            let namespace = Namespace {
                name: sheet.sheet_name.clone(),
                tree: unflatten(&column.entries),
            };

            let index = match bundles
                .iter()
                .position(|bundle| bundle.language == column.language)
            {
                Some(index) => index,
                None => {
                    bundles.push(LanguageBundle {
                        language: column.language,
                        namespaces: Vec::new(),
                    });
                    bundles.len() - 1
                }
            };

            let namespaces = &mut bundles[index].namespaces;
            match namespaces
                .iter_mut()
                .find(|existing| existing.name == namespace.name)
            {
                Some(existing) => *existing = namespace,
                None => namespaces.push(namespace),
            }
        }
    }

    bundles
}
