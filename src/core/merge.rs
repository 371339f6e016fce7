//! Merge engine: apply a source lookup table to a destination sheet.

use crate::core::lookup::{cell_key, normalize_key, SourceTable};
use crate::core::scorer::{best_match, Ratio};
use crate::types::{CellUpdate, ColumnRef, MatchKind, MergeReport, RowBounds, Sheet};
use calamine::Data;

/// Matching strategy for a merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Direct key lookup only.
    Exact { ignore_case: bool },
    /// Literal lookup first, then fuzzy scoring against every source key.
    Fuzzy { threshold: u8, ratio: Ratio },
}

/// Options for a merge run over the destination document.
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions {
    /// Column holding the keys to look up.
    pub match_column: ColumnRef,
    /// Column populated with source values.
    pub target_column: ColumnRef,
    pub rows: RowBounds,
    pub mode: MergeMode,
}

pub struct MergeEngine {
    options: MergeOptions,
}

impl MergeEngine {
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Run the merge, rewriting matched destination cells and recording
    /// every change.
    ///
    /// Cells already holding the source value are left alone so they are
    /// not highlighted as changed. A match cell that is empty after
    /// trimming skips the row.
    pub fn run(&self, dest: &mut Sheet, source: &SourceTable) -> MergeReport {
        let opts = &self.options;
        let mut report = MergeReport::default();

        for row in opts.rows.resolve(dest.last_row()) {
            report.rows_scanned += 1;

            let raw = dest
                .cell(row, opts.match_column)
                .map(cell_key)
                .unwrap_or_default();
            let key = match opts.mode {
                MergeMode::Exact { ignore_case: true } => normalize_key(&raw),
                _ => raw,
            };
            if key.is_empty() {
                report.skipped_empty += 1;
                continue;
            }

            let hit = match opts.mode {
                MergeMode::Exact { .. } => {
                    source.get(&key).map(|value| (value, MatchKind::Literal))
                }
                MergeMode::Fuzzy { threshold, ratio } => {
                    if let Some(value) = source.get(&key) {
                        Some((value, MatchKind::Literal))
                    } else {
                        match best_match(&key, source.keys(), ratio) {
                            Some((matched, score)) if score >= threshold => {
                                source.get(matched).map(|value| {
                                    (
                                        value,
                                        MatchKind::Fuzzy {
                                            matched: matched.to_string(),
                                            score,
                                        },
                                    )
                                })
                            }
                            _ => None,
                        }
                    }
                }
            };

            let Some((value, kind)) = hit else {
                report.unmatched += 1;
                continue;
            };

            let unchanged = match dest.cell(row, opts.target_column) {
                Some(current) => current == value,
                None => matches!(value, Data::Empty),
            };
            if unchanged {
                report.unchanged += 1;
            } else {
                let value = value.clone();
                dest.set_cell(row, opts.target_column, value);
                report.updates.push(CellUpdate { row, kind });
            }
        }

        report
    }
}
