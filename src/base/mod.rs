//! Foundation types for the gold-meta crate.
//!
//! This module provides the primitives used throughout the analysis layers:
//! - [`Position`] - line/column/offset location of a token or definition
//! - [`NameSet`] - unordered set of case-insensitive names
//! - [`text`] - substring extraction for delimited grammar names
//!
//! This module has NO dependencies on other gold-meta modules.

mod name_set;
mod position;
pub mod text;

pub use name_set::NameSet;
pub use position::Position;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};

/// Case-insensitive string equality, as GOLD compares grammar names.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
