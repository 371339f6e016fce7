//! xltools - match and merge Excel workbooks by cell contents
//!
//! This library reads a lookup table from a source .xlsx document
//! (match column → data column), matches each destination row's key
//! against it - literally or by fuzzy string similarity - and fills the
//! destination data column with the source value, highlighting changed
//! cells for review.
//!
//! # Features
//!
//! - Exact matching, optionally case/whitespace-insensitive
//! - Fuzzy matching with simple or weighted similarity ratios
//! - Highlight fills on changed cells, colored by match quality
//! - Backup and output-naming conventions for safe in-place merges
//!
//! # Example
//!
//! ```no_run
//! use xltools::core::{MergeEngine, MergeMode, MergeOptions, SourceTable};
//! use xltools::excel::read_sheet;
//! use xltools::types::RowBounds;
//! use std::path::Path;
//!
//! let source = read_sheet(Path::new("prices.xlsx"), None)?;
//! let mut dest = read_sheet(Path::new("inventory.xlsx"), None)?;
//!
//! let table = SourceTable::from_sheet(
//!     &source,
//!     "A".parse()?,
//!     "B".parse()?,
//!     &RowBounds::new(2, None),
//!     false,
//! );
//!
//! let engine = MergeEngine::new(MergeOptions {
//!     match_column: "A".parse()?,
//!     target_column: "C".parse()?,
//!     rows: RowBounds::new(2, None),
//!     mode: MergeMode::Exact { ignore_case: false },
//! });
//! let report = engine.run(&mut dest, &table);
//! println!("{} cells updated", report.updates.len());
//! # Ok::<(), xltools::error::XlError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{XlError, XlResult};
pub use types::{CellUpdate, ColumnRef, MatchKind, MergeReport, Rgb, RowBounds, Sheet};
