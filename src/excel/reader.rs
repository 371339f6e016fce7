//! Workbook reading - .xlsx → in-memory `Sheet`

use crate::error::{XlError, XlResult};
use crate::types::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

/// Read one worksheet of an .xlsx workbook into a dense grid.
///
/// `sheet` selects a worksheet by name; `None` takes the first sheet in
/// the workbook. Cells keep their absolute coordinates, so a used range
/// starting past A1 still addresses correctly.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> XlResult<Sheet> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| XlError::Workbook(format!("Failed to open {}: {}", path.display(), e)))?;

    let names = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => {
            if !names.iter().any(|n| n == name) {
                return Err(XlError::Workbook(format!(
                    "Worksheet '{}' not found in {} (available: {})",
                    name,
                    path.display(),
                    names.join(", ")
                )));
            }
            name.to_string()
        }
        None => names.first().cloned().ok_or_else(|| {
            XlError::Workbook(format!("{} has no worksheets", path.display()))
        })?,
    };

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        XlError::Workbook(format!(
            "Failed to read worksheet '{}' from {}: {}",
            sheet_name,
            path.display(),
            e
        ))
    })?;

    let mut rows: Vec<Vec<Data>> = Vec::new();
    if let Some((end_row, end_col)) = range.end() {
        rows = vec![vec![Data::Empty; end_col as usize + 1]; end_row as usize + 1];
        for (row_idx, row) in rows.iter_mut().enumerate() {
            for (col_idx, cell) in row.iter_mut().enumerate() {
                if let Some(value) = range.get_value((row_idx as u32, col_idx as u32)) {
                    *cell = value.clone();
                }
            }
        }
    }

    Ok(Sheet::from_rows(sheet_name, rows))
}
