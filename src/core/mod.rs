//! Core matching machinery: source lookup table, fuzzy scoring, merge engine.

pub mod lookup;
pub mod merge;
pub mod scorer;

pub use lookup::SourceTable;
pub use merge::{MergeEngine, MergeMode, MergeOptions};
pub use scorer::Ratio;
