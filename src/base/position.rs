//! Source locations for tokens and definitions.
//!
//! Lines and columns are 1-based, matching what the GOLDbuild compiler
//! reports; the byte offset is 0-based. `(line 0, column 0)` never names a
//! real location and is reserved as the "no location" sentinel in
//! diagnostics output.

use text_size::TextSize;

/// A position in the document: 1-based line/column plus byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: TextSize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: TextSize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// The start of the document.
    pub fn start() -> Self {
        Self::new(1, 1, TextSize::new(0))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}
