//! # gold-meta
//!
//! Core library for editor-grade analysis of GOLD grammar files: symbol
//! indexing, completion, rename, and compiler-output diagnostics.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → editor features (completion, rename, diagnostics)
//!   ↓
//! index     → per-document symbol index and token list
//!   ↓
//! parser    → Logos lexer, token stream, token classification
//!   ↓
//! base      → primitives (Position, NameSet, name extraction)
//! ```
//!
//! Analysis is error tolerant throughout: any byte sequence is accepted and
//! the features answer from whatever structure can still be recognized.

use std::path::PathBuf;

// ============================================================================
// MODULES (dependency order: base → parser → index → ide)
// ============================================================================

/// Foundation types: Position, NameSet, delimited-name extraction
pub mod base;

/// Parser: Logos lexer, token stream, SyntaxKind classification
pub mod parser;

/// Index: per-document definitions and tokens with position queries
pub mod index;

/// IDE features: completion, rename segments, build diagnostics
pub mod ide;

// Re-export commonly needed items
pub use base::{Position, TextRange, TextSize};
pub use index::{Definition, DocumentIndex};
pub use parser::{DefinitionKind, SyntaxKind, Token, TokenStream};

/// Errors surfaced to the host editor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read grammar file `{path}`")]
    ReadGrammar {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
