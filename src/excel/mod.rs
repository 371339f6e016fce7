//! Workbook I/O: calamine for reading, rust_xlsxwriter for writing.

pub mod reader;
pub mod writer;

pub use reader::read_sheet;
pub use writer::{
    HighlightStyle, SheetWriter, FUZZY_CLOSE_COLOR, FUZZY_DISTANT_COLOR, LITERAL_MATCH_COLOR,
};
