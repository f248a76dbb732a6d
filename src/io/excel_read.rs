use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::error::{Result, ToolError};
use crate::model::{FlatEntry, SheetColumn, SheetTranslations};

const HEADER_ROW: u32 = 0;
const KEY_COLUMN: u32 = 0;

/// Reads every sheet of the workbook, in workbook order, following the
/// layout produced by the [`excel_write`](crate::io::excel_write) module.
pub fn read_translations(path: &Path) -> Result<Vec<SheetTranslations>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = read_required_sheet(&mut workbook, &sheet_name)?;
        let columns = read_sheet_columns(&range);
        debug!(
            sheet = %sheet_name,
            languages = columns.len(),
            "read worksheet"
        );
        sheets.push(SheetTranslations {
            sheet_name,
            columns,
        });
    }

    Ok(sheets)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

/// Reads each language column of a sheet into its own entry sequence.
pub fn read_sheet_columns(range: &Range<DataType>) -> Vec<SheetColumn> {
    discover_languages(range)
        .into_iter()
        .enumerate()
        .map(|(index, language)| SheetColumn {
            language,
            entries: read_language_column(range, KEY_COLUMN + 1 + index as u32),
        })
        .collect()
}

/// Returns the header labels after the `Key` cell, stopping at the first
/// blank cell. Duplicates are kept.
pub fn discover_languages(range: &Range<DataType>) -> Vec<String> {
    (KEY_COLUMN + 1..)
        .map(|column| cell_at(range, HEADER_ROW, column))
        .take_while(|label| !label.is_empty())
        .collect()
}

/// Scans rows below the header until the key or the value cell is blank.
pub fn read_language_column(range: &Range<DataType>, column: u32) -> Vec<FlatEntry> {
    (HEADER_ROW + 1..)
        .map(|row| (cell_at(range, row, KEY_COLUMN), cell_at(range, row, column)))
        .take_while(|(key, value)| !key.is_empty() && !value.is_empty())
        .map(|(key, value)| FlatEntry { key, value })
        .collect()
}

fn cell_at(range: &Range<DataType>, row: u32, column: u32) -> String {
    cell_to_string(range.get_value((row, column)))
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
