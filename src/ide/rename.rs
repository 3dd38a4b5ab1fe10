//! Symbol rename over the flat token stream.
//!
//! A rename rewrites every case-insensitive occurrence of a symbol name in
//! place. The provider returns the editable inner ranges: delimiters of set
//! names and nonterminals stay put, only the name between them changes.

use text_size::{TextRange, TextSize};

use crate::index::DocumentIndex;
use crate::parser::{DefinitionKind, SyntaxKind, Token};

/// The editable ranges of one symbol across the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSegments {
    /// Every occurrence, in document order, defining one included.
    pub segments: Vec<TextRange>,
    /// The occurrence under the cursor.
    pub primary: TextRange,
    pub kind: DefinitionKind,
}

impl RenameSegments {
    pub fn has_segments(&self) -> bool {
        !self.segments.is_empty()
    }
}

/// The rename segments for the symbol at `offset`, or `None` when the
/// offset does not sit on a renameable symbol.
///
/// Set names, nonterminals, and bare terminal names are renameable.
/// Terminal literals, properties, operators, and trivia are not.
pub fn find_rename_segments(text: &str, offset: TextSize) -> Option<RenameSegments> {
    let index = DocumentIndex::parse(text);
    let token = index.token_at(offset)?;
    if !is_renameable(token) {
        return None;
    }

    let mut segments = Vec::new();
    let mut primary = None;
    for occurrence in index.uses_of(&token.text) {
        let segment = editable_range(occurrence);
        if occurrence.position.offset == token.position.offset {
            primary = Some(segment);
        }
        segments.push(segment);
    }

    Some(RenameSegments {
        segments,
        primary: primary?,
        kind: token.definition_kind(),
    })
}

fn is_renameable(token: &Token) -> bool {
    match token.kind {
        SyntaxKind::SET_NAME | SyntaxKind::NONTERMINAL => true,
        SyntaxKind::TERMINAL => !token.is_terminal_literal(),
        _ => false,
    }
}

/// The token range with delimiters excluded.
fn editable_range(token: &Token) -> TextRange {
    let mut start = token.position.offset;
    let mut len = token.len();
    if token.text.starts_with(['{', '<']) {
        start += TextSize::new(1);
        len -= TextSize::new(2);
    }
    TextRange::at(start, len)
}
