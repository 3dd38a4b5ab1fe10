//! Tokenization of the GOLD grammar meta-language.
//!
//! This module provides:
//! - **logos** lexer for the fixed meta-language ([`Lexer`], [`Token`])
//! - token role classification ([`SyntaxKind`], [`DefinitionKind`])
//! - a pull-based token source with EOF synthesis ([`TokenStream`])
//!
//! There is deliberately no grammar-level parse tree here. Every consumer
//! works off the flat token stream, because most real edits leave the
//! document in a state that does not parse as a complete grammar.

mod lexer;
mod syntax_kind;
mod token_source;

pub use lexer::{Lexer, Token, tokenize};
pub use syntax_kind::{DefinitionKind, SyntaxKind};
pub use token_source::TokenStream;
