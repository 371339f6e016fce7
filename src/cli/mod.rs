//! CLI command handlers

pub mod commands;

pub use commands::{exact, fuzzy, DocRange, MergeJob};
