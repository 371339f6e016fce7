use crate::error::XlError;
use calamine::Data;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

//==============================================================================
// Column and Row Addressing
//==============================================================================

/// A spreadsheet column reference such as `B` or `AE`.
///
/// Parses from a letter label (case-insensitive) and stores the 0-based
/// column index. Displays back as uppercase letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnRef(u32);

impl ColumnRef {
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// 0-based column index (A = 0).
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl FromStr for ColumnRef {
    type Err = XlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Excel columns stop at XFD; three letters is the widest valid label
        if s.is_empty() || s.len() > 3 || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(XlError::Column(s.to_string()));
        }
        let mut index: u32 = 0;
        for c in s.chars() {
            let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
            index = index * 26 + digit;
        }
        Ok(Self(index - 1))
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut label = String::new();
        let mut num = self.0 as usize;
        loop {
            let remainder = num % 26;
            label.insert(0, (b'A' + remainder as u8) as char);
            if num < 26 {
                break;
            }
            num = num / 26 - 1;
        }
        f.write_str(&label)
    }
}

/// A 1-based inclusive row window. `max = None` means "through the last
/// occupied row of the sheet".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBounds {
    pub min: u32,
    pub max: Option<u32>,
}

impl RowBounds {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Resolve against a sheet's last occupied row. The result iterates
    /// nothing when the sheet ends before `min`.
    pub fn resolve(&self, last_row: u32) -> std::ops::RangeInclusive<u32> {
        self.min..=self.max.unwrap_or(last_row)
    }
}

//==============================================================================
// Highlight Colors
//==============================================================================

/// A 6-hex-digit RGB color such as `FFFF00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(u32);

impl Rgb {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for Rgb {
    type Err = XlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = Regex::new(r"^[0-9a-fA-F]{6}$")
            .map_err(|e| XlError::Validation(format!("Regex error: {}", e)))?;
        if !pattern.is_match(s) {
            return Err(XlError::Validation(format!(
                "{} is not a valid RGB color",
                s
            )));
        }
        let value = u32::from_str_radix(s, 16)
            .map_err(|e| XlError::Validation(format!("{} is not a valid RGB color: {}", s, e)))?;
        Ok(Self(value))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

//==============================================================================
// Worksheet Grid
//==============================================================================

/// In-memory cell grid for one worksheet.
///
/// Rows are dense and 0-based internally; the accessors speak 1-based
/// Excel rows so call sites read like cell addresses. Reads outside the
/// grid yield `None`; writes grow the grid as needed.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<Data>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Last occupied Excel row (1-based); 0 for an empty sheet.
    pub fn last_row(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Cell at 1-based `row` and `col`, if present.
    pub fn cell(&self, row: u32, col: ColumnRef) -> Option<&Data> {
        if row == 0 {
            return None;
        }
        self.rows.get(row as usize - 1)?.get(col.index() as usize)
    }

    /// Set the cell at 1-based `row`, growing the grid as needed.
    pub fn set_cell(&mut self, row: u32, col: ColumnRef, value: Data) {
        if row == 0 {
            return;
        }
        let r = row as usize - 1;
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let line = &mut self.rows[r];
        let c = col.index() as usize;
        if line.len() <= c {
            line.resize(c + 1, Data::Empty);
        }
        line[c] = value;
    }

    pub fn rows(&self) -> &[Vec<Data>] {
        &self.rows
    }
}

//==============================================================================
// Merge Outcome
//==============================================================================

/// How a destination row was matched against the source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// Key found in the source table by direct lookup.
    Literal,
    /// Accepted fuzzy match, with the source key it resolved to and its
    /// 0-100 score.
    Fuzzy { matched: String, score: u8 },
}

/// A destination cell rewritten by the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    /// 1-based Excel row.
    pub row: u32,
    pub kind: MatchKind,
}

/// Summary of one merge run. Every scanned row lands in exactly one of:
/// an update, `unchanged`, `skipped_empty`, or `unmatched`.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub updates: Vec<CellUpdate>,
    pub rows_scanned: u32,
    /// Rows whose match cell was empty after trimming.
    pub skipped_empty: u32,
    /// Rows with no literal hit and no fuzzy score above the threshold.
    pub unmatched: u32,
    /// Rows that matched but already held the source value.
    pub unchanged: u32,
}

impl MergeReport {
    pub fn literal_updates(&self) -> usize {
        self.updates
            .iter()
            .filter(|u| u.kind == MatchKind::Literal)
            .count()
    }

    pub fn fuzzy_updates(&self) -> usize {
        self.updates.len() - self.literal_updates()
    }
}

//==============================================================================
// Output Paths
//==============================================================================

/// Derive a sibling path by appending `_suffix` to the file stem:
/// `report.xlsx` + `new` becomes `report_new.xlsx`.
pub fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, suffix, ext),
        None => format!("{}_{}", stem, suffix),
    };
    path.with_file_name(name)
}

/// Where merged output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Overwrite the destination document.
    InPlace,
    /// Write a `_new`-suffixed sibling of the destination document.
    Suffixed,
    /// Write to an explicit path.
    Path(PathBuf),
}

impl OutputTarget {
    /// Interpret the CLI `--output` flag: omitted flag overwrites the
    /// destination, a bare flag writes the suffixed sibling, a value is
    /// taken as-is.
    pub fn from_flag(flag: Option<PathBuf>) -> Self {
        match flag {
            None => OutputTarget::InPlace,
            Some(path) if path.as_os_str().is_empty() => OutputTarget::Suffixed,
            Some(path) => OutputTarget::Path(path),
        }
    }

    /// Resolve to a concrete path relative to the destination document.
    pub fn resolve(&self, dest: &Path) -> PathBuf {
        match self {
            OutputTarget::InPlace => dest.to_path_buf(),
            OutputTarget::Suffixed => suffixed_path(dest, "new"),
            OutputTarget::Path(path) => path.clone(),
        }
    }
}
