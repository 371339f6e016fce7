//! Source lookup table built from the source worksheet.

use crate::types::{ColumnRef, RowBounds, Sheet};
use calamine::Data;
use std::collections::HashMap;

/// Trimmed string form of a cell used as a match key. Empty cells yield "".
pub fn cell_key(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Case-folded, trimmed key for case-insensitive matching.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Lookup table mapping match-column keys to data-column values.
///
/// Keys keep their first-insertion position; inserting an existing key
/// overwrites the value in place. Iteration follows insertion order, which
/// makes fuzzy tie-breaking deterministic.
#[derive(Debug, Default)]
pub struct SourceTable {
    entries: Vec<(String, Data)>,
    index: HashMap<String, usize>,
    skipped_empty: u32,
}

impl SourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from `sheet`, reading keys from `match_col` and
    /// values from `value_col` over the `rows` window. Rows whose match
    /// cell is empty after trimming are skipped and counted.
    pub fn from_sheet(
        sheet: &Sheet,
        match_col: ColumnRef,
        value_col: ColumnRef,
        rows: &RowBounds,
        ignore_case: bool,
    ) -> Self {
        let mut table = Self::new();
        for row in rows.resolve(sheet.last_row()) {
            let key = sheet
                .cell(row, match_col)
                .map(cell_key)
                .unwrap_or_default();
            let key = if ignore_case { normalize_key(&key) } else { key };
            if key.is_empty() {
                table.skipped_empty += 1;
                continue;
            }
            let value = sheet.cell(row, value_col).cloned().unwrap_or(Data::Empty);
            table.insert(key, value);
        }
        table
    }

    pub fn insert(&mut self, key: String, value: Data) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Data> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows dropped while reading the sheet because the match cell was empty.
    pub fn skipped_rows(&self) -> u32 {
        self.skipped_empty
    }
}
