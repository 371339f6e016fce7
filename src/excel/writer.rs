//! Workbook writing - in-memory `Sheet` → .xlsx

use crate::error::{XlError, XlResult};
use crate::types::{ColumnRef, MatchKind, Rgb, Sheet};
use calamine::Data;
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet};
use std::collections::HashMap;
use std::path::Path;

/// Fill for cells updated by a literal match.
pub const LITERAL_MATCH_COLOR: u32 = 0x90EE90;
/// Fill for fuzzy updates scoring 99 or 100.
pub const FUZZY_CLOSE_COLOR: u32 = 0xFCE883;
/// Fill for accepted fuzzy updates below 99.
pub const FUZZY_DISTANT_COLOR: u32 = 0xFF91A4;

/// How updated cells are highlighted in the output workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightStyle {
    /// Leave updated cells unformatted.
    None,
    /// One fill color for every updated cell.
    Single(Rgb),
    /// Color by match quality: literal, close fuzzy, distant fuzzy.
    Scored,
}

impl HighlightStyle {
    /// Fill color for an update of the given kind, if any.
    pub fn fill(&self, kind: &MatchKind) -> Option<u32> {
        match self {
            HighlightStyle::None => None,
            HighlightStyle::Single(rgb) => Some(rgb.value()),
            HighlightStyle::Scored => Some(match kind {
                MatchKind::Literal => LITERAL_MATCH_COLOR,
                MatchKind::Fuzzy { score, .. } if *score >= 99 => FUZZY_CLOSE_COLOR,
                MatchKind::Fuzzy { .. } => FUZZY_DISTANT_COLOR,
            }),
        }
    }
}

/// Serializes a sheet grid to a new .xlsx workbook, with optional solid
/// fills on designated cells.
pub struct SheetWriter<'a> {
    sheet: &'a Sheet,
    fills: HashMap<(u32, u16), u32>,
}

impl<'a> SheetWriter<'a> {
    pub fn new(sheet: &'a Sheet) -> Self {
        Self {
            sheet,
            fills: HashMap::new(),
        }
    }

    /// Request a solid fill on the cell at 1-based `row` / `col`.
    pub fn highlight(&mut self, row: u32, col: ColumnRef, color: u32) {
        if row == 0 {
            return;
        }
        self.fills.insert((row - 1, col.index() as u16), color);
    }

    /// Write the sheet to `path`.
    pub fn save(&self, path: &Path) -> XlResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&self.sheet.name)
            .map_err(|e| XlError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (row_idx, row) in self.sheet.rows().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let row_num = row_idx as u32;
                let col_num = col_idx as u16;
                let format = self.fills.get(&(row_num, col_num)).map(|&color| {
                    Format::new()
                        .set_pattern(FormatPattern::Solid)
                        .set_background_color(Color::RGB(color))
                });
                write_cell(worksheet, row_num, col_num, cell, format.as_ref())?;
            }
        }

        workbook
            .save(path)
            .map_err(|e| XlError::Export(format!("Failed to save {}: {}", path.display(), e)))?;
        Ok(())
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Data,
    format: Option<&Format>,
) -> XlResult<()> {
    let result = match cell {
        Data::Empty => return Ok(()),
        Data::String(s) => match format {
            Some(f) => worksheet.write_string_with_format(row, col, s, f).map(|_| ()),
            None => worksheet.write_string(row, col, s).map(|_| ()),
        },
        Data::Float(v) => match format {
            Some(f) => worksheet.write_number_with_format(row, col, *v, f).map(|_| ()),
            None => worksheet.write_number(row, col, *v).map(|_| ()),
        },
        Data::Int(v) => match format {
            Some(f) => worksheet
                .write_number_with_format(row, col, *v as f64, f)
                .map(|_| ()),
            None => worksheet.write_number(row, col, *v as f64).map(|_| ()),
        },
        Data::Bool(b) => match format {
            Some(f) => worksheet.write_boolean_with_format(row, col, *b, f).map(|_| ()),
            None => worksheet.write_boolean(row, col, *b).map(|_| ()),
        },
        // Dates carry across as Excel serial numbers
        Data::DateTime(dt) => match format {
            Some(f) => worksheet
                .write_number_with_format(row, col, dt.as_f64(), f)
                .map(|_| ()),
            None => worksheet.write_number(row, col, dt.as_f64()).map(|_| ()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => match format {
            Some(f) => worksheet.write_string_with_format(row, col, s, f).map(|_| ()),
            None => worksheet.write_string(row, col, s).map(|_| ()),
        },
        // Error cells carry across as their display form (#DIV/0! etc.)
        Data::Error(e) => {
            let text = e.to_string();
            match format {
                Some(f) => worksheet
                    .write_string_with_format(row, col, &text, f)
                    .map(|_| ()),
                None => worksheet.write_string(row, col, &text).map(|_| ()),
            }
        }
    };

    result.map_err(|e| XlError::Export(format!("Failed to write cell ({}, {}): {}", row, col, e)))
}
