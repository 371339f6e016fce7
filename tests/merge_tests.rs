//! End-to-end merge tests asserting cell-level results read back from
//! the output workbooks.

use calamine::Data;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xltools::cli::commands::{self, DocRange, MergeJob};
use xltools::excel::{read_sheet, SheetWriter};
use xltools::types::{ColumnRef, OutputTarget, RowBounds, Sheet};

fn col(label: &str) -> ColumnRef {
    label.parse().unwrap()
}

/// Cells inside the used range read back as explicit `Data::Empty`;
/// cells past it read back as `None`. Both mean "no value".
fn assert_no_value(sheet: &Sheet, row: u32, column: ColumnRef) {
    assert!(
        matches!(sheet.cell(row, column), None | Some(Data::Empty)),
        "expected no value at {}{}, got {:?}",
        column,
        row,
        sheet.cell(row, column)
    );
}

fn write_rows(path: &Path, rows: &[Vec<Data>]) {
    let mut sheet = Sheet::new("Sheet1");
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if !matches!(value, Data::Empty) {
                sheet.set_cell(
                    row_idx as u32 + 1,
                    ColumnRef::from_index(col_idx as u32),
                    value.clone(),
                );
            }
        }
    }
    SheetWriter::new(&sheet).save(path).unwrap();
}

fn s(text: &str) -> Data {
    Data::String(text.to_string())
}

fn job(dest: &Path, source: &Path, output: &Path) -> MergeJob {
    MergeJob {
        dest: dest.to_path_buf(),
        source: source.to_path_buf(),
        output: OutputTarget::Path(output.to_path_buf()),
        dest_range: DocRange {
            sheet: None,
            match_column: col("A"),
            data_column: col("C"),
            rows: RowBounds::new(2, None),
        },
        source_range: DocRange {
            sheet: None,
            match_column: col("A"),
            data_column: col("B"),
            rows: RowBounds::new(2, None),
        },
        backup: false,
        verbose: false,
    }
}

fn setup(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
    (
        dir.path().join("dest.xlsx"),
        dir.path().join("source.xlsx"),
        dir.path().join("merged.xlsx"),
    )
}

#[test]
fn test_exact_merge_cell_values() {
    let dir = TempDir::new().unwrap();
    let (dest, source, output) = setup(&dir);

    write_rows(
        &dest,
        &[
            vec![s("key"), Data::Empty, s("price")],
            vec![s("Widget")],
            vec![s("Gadget")],
            vec![s("Sprocket")],
        ],
    );
    write_rows(
        &source,
        &[
            vec![s("key"), s("value")],
            vec![s("Widget"), Data::Float(9.5)],
            vec![s("Sprocket"), Data::Float(3.25)],
            vec![s("Doohickey"), Data::Float(1.0)],
        ],
    );

    commands::exact(job(&dest, &source, &output), false, None).unwrap();

    let merged = read_sheet(&output, None).unwrap();
    // Header row is outside the merge window and untouched
    assert_eq!(merged.cell(1, col("A")), Some(&s("key")));
    assert_eq!(merged.cell(1, col("C")), Some(&s("price")));
    // Matched rows are populated, unmatched rows stay empty
    assert_eq!(merged.cell(2, col("C")), Some(&Data::Float(9.5)));
    assert_no_value(&merged, 3, col("C"));
    assert_eq!(merged.cell(4, col("C")), Some(&Data::Float(3.25)));
    // Match keys carry across untouched
    assert_eq!(merged.cell(2, col("A")), Some(&s("Widget")));
}

#[test]
fn test_exact_merge_ignore_case_and_whitespace() {
    let dir = TempDir::new().unwrap();
    let (dest, source, output) = setup(&dir);

    write_rows(
        &dest,
        &[vec![s("key")], vec![s("  WIDGET ")], vec![s("gadget")]],
    );
    write_rows(
        &source,
        &[
            vec![s("key"), s("value")],
            vec![s("Widget"), Data::Float(9.5)],
            vec![s("GADGET"), Data::Float(2.0)],
        ],
    );

    commands::exact(job(&dest, &source, &output), true, None).unwrap();

    let merged = read_sheet(&output, None).unwrap();
    assert_eq!(merged.cell(2, col("C")), Some(&Data::Float(9.5)));
    assert_eq!(merged.cell(3, col("C")), Some(&Data::Float(2.0)));
}

#[test]
fn test_exact_merge_is_case_sensitive_by_default() {
    let dir = TempDir::new().unwrap();
    let (dest, source, output) = setup(&dir);

    write_rows(&dest, &[vec![s("key")], vec![s("WIDGET")]]);
    write_rows(
        &source,
        &[vec![s("key"), s("value")], vec![s("Widget"), Data::Float(9.5)]],
    );

    commands::exact(job(&dest, &source, &output), false, None).unwrap();

    let merged = read_sheet(&output, None).unwrap();
    assert_no_value(&merged, 2, col("C"));
}

#[test]
fn test_fuzzy_merge_cell_values() {
    let dir = TempDir::new().unwrap();
    let (dest, source, output) = setup(&dir);

    write_rows(
        &dest,
        &[
            vec![s("key")],
            vec![s("Mississippi")],
            vec![s("Missisippi")],
            vec![s("zebra")],
        ],
    );
    write_rows(
        &source,
        &[
            vec![s("key"), s("value")],
            vec![s("Mississippi"), Data::Float(42.0)],
        ],
    );

    commands::fuzzy(job(&dest, &source, &output), 90, false).unwrap();

    let merged = read_sheet(&output, None).unwrap();
    // Row 2 matches literally, row 3 fuzzily, row 4 not at all
    assert_eq!(merged.cell(2, col("C")), Some(&Data::Float(42.0)));
    assert_eq!(merged.cell(3, col("C")), Some(&Data::Float(42.0)));
    assert_no_value(&merged, 4, col("C"));
}

#[test]
fn test_fuzzy_merge_threshold_rejects_weak_matches() {
    let dir = TempDir::new().unwrap();
    let (dest, source, output) = setup(&dir);

    write_rows(&dest, &[vec![s("key")], vec![s("Missisippi")]]);
    write_rows(
        &source,
        &[
            vec![s("key"), s("value")],
            vec![s("Mississippi"), Data::Float(42.0)],
        ],
    );

    commands::fuzzy(job(&dest, &source, &output), 100, false).unwrap();

    let merged = read_sheet(&output, None).unwrap();
    assert_no_value(&merged, 2, col("C"));
}

#[test]
fn test_merge_preserves_existing_values_outside_target() {
    let dir = TempDir::new().unwrap();
    let (dest, source, output) = setup(&dir);

    write_rows(
        &dest,
        &[
            vec![s("key"), s("note"), Data::Empty, s("extra")],
            vec![s("Widget"), s("keep me"), Data::Empty, Data::Float(7.0)],
        ],
    );
    write_rows(
        &source,
        &[vec![s("key"), s("value")], vec![s("Widget"), Data::Float(9.5)]],
    );

    commands::exact(job(&dest, &source, &output), false, None).unwrap();

    let merged = read_sheet(&output, None).unwrap();
    assert_eq!(merged.cell(2, col("B")), Some(&s("keep me")));
    assert_eq!(merged.cell(2, col("C")), Some(&Data::Float(9.5)));
    assert_eq!(merged.cell(2, col("D")), Some(&Data::Float(7.0)));
}

#[test]
fn test_merge_row_window_excludes_rows() {
    let dir = TempDir::new().unwrap();
    let (dest, source, output) = setup(&dir);

    write_rows(
        &dest,
        &[
            vec![s("key")],
            vec![s("Widget")],
            vec![s("Sprocket")],
        ],
    );
    write_rows(
        &source,
        &[
            vec![s("key"), s("value")],
            vec![s("Widget"), Data::Float(9.5)],
            vec![s("Sprocket"), Data::Float(3.25)],
        ],
    );

    let mut job = job(&dest, &source, &output);
    job.dest_range.rows = RowBounds::new(2, Some(2));
    commands::exact(job, false, None).unwrap();

    let merged = read_sheet(&output, None).unwrap();
    assert_eq!(merged.cell(2, col("C")), Some(&Data::Float(9.5)));
    assert_no_value(&merged, 3, col("C"));
}

#[test]
fn test_sheet_selection_by_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("multi.xlsx");

    // Two worksheets; the lookup data lives in the second one
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let first = workbook.add_worksheet();
    first.set_name("Summary").unwrap();
    first.write_string(0, 0, "nothing here").unwrap();
    let second = workbook.add_worksheet();
    second.set_name("Lookup").unwrap();
    second.write_string(0, 0, "key").unwrap();
    second.write_string(1, 0, "Widget").unwrap();
    second.write_number(1, 1, 9.5).unwrap();
    workbook.save(&path).unwrap();

    let by_default = read_sheet(&path, None).unwrap();
    assert_eq!(by_default.name, "Summary");

    let by_name = read_sheet(&path, Some("Lookup")).unwrap();
    assert_eq!(by_name.name, "Lookup");
    assert_eq!(by_name.cell(2, col("A")), Some(&s("Widget")));
    assert_eq!(by_name.cell(2, col("B")), Some(&Data::Float(9.5)));

    let missing = read_sheet(&path, Some("Nope"));
    assert!(missing.is_err(), "Unknown worksheet name should error");
}
