//! CSV-folder to XLSX conversion
//!
//! Reads every CSV file in a folder and writes them as sheets of a single
//! XLSX workbook, one sheet per file. Sheet names are the file stem,
//! truncated to the 31-character cap; hidden files and non-CSV files are
//! skipped.

use crate::config::MAX_TAB_NAME_LEN;
use crate::domain::{Result, SheetporterError, TableData};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Read one CSV file into a sanitized table. The first record is the header.
pub fn read_csv_table(path: &Path) -> Result<TableData> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        SheetporterError::Csv(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| SheetporterError::Csv(format!("{}: {}", path.display(), e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| SheetporterError::Csv(format!("{}: {}", path.display(), e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(TableData::new(columns, rows))
}

/// Derive a sheet name from a CSV file stem, clamped to the length cap.
pub fn sheet_name_for(stem: &str) -> String {
    stem.chars().take(MAX_TAB_NAME_LEN).collect()
}

/// Write the named tables into a single XLSX workbook.
pub fn write_workbook(path: &Path, sheets: &[(String, TableData)]) -> Result<()> {
    let mut workbook = Workbook::new();

    for (name, table) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;

        for (col_idx, header) in table.columns.iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, header)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Convert every CSV file of `input_dir` into one workbook at `output_path`.
///
/// Returns the number of sheets written. Files are processed in name order
/// so the workbook layout is deterministic.
pub fn convert_folder(input_dir: &Path, output_path: &Path) -> Result<usize> {
    if !input_dir.is_dir() {
        return Err(SheetporterError::LocalFile(format!(
            "Input folder not found: {}",
            input_dir.display()
        )));
    }

    let mut csv_paths: Vec<_> = std::fs::read_dir(input_dir)
        .map_err(|e| {
            SheetporterError::LocalFile(format!("Cannot read {}: {}", input_dir.display(), e))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_csv_file(path))
        .collect();
    csv_paths.sort();

    let mut sheets = Vec::with_capacity(csv_paths.len());
    for path in &csv_paths {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sheet_name = sheet_name_for(&stem);

        tracing::info!(
            file = %path.display(),
            sheet = %sheet_name,
            "Converting CSV into sheet"
        );

        sheets.push((sheet_name, read_csv_table(path)?));
    }

    if sheets.is_empty() {
        tracing::warn!(folder = %input_dir.display(), "No CSV files found, skipping workbook");
        return Ok(0);
    }

    write_workbook(output_path, &sheets)?;
    Ok(sheets.len())
}

/// A convertible file ends in `.csv` and is not hidden.
fn is_csv_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    !name.starts_with('.') && name.to_ascii_lowercase().ends_with(".csv")
}
