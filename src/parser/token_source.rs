//! Token source over a text buffer.
//!
//! [`TokenStream`] is the "next token" surface the index and the completion
//! resolver pull from. Unlike the raw [`Lexer`](super::Lexer) iterator it
//! never runs dry: once the input is exhausted it synthesizes a single
//! end-of-input token and keeps returning it, which lets consumers scan
//! "until EOF" without option-juggling.

use smol_str::SmolStr;

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// A pull-based token source for one text snapshot.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    exhausted: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            exhausted: false,
        }
    }

    /// The next token in the document, trivia included. At end of input
    /// this returns the EOF token, again and again.
    pub fn next_token(&mut self) -> Token {
        if !self.exhausted {
            if let Some(token) = self.lexer.next() {
                return token;
            }
            self.exhausted = true;
        }
        Token {
            kind: SyntaxKind::EOF,
            text: SmolStr::default(),
            position: self.lexer.position(),
        }
    }

    /// The next non-trivia token. Newlines and error tokens are
    /// significant; only whitespace and comments are skipped.
    pub fn next_significant(&mut self) -> Token {
        loop {
            let token = self.next_token();
            if !token.is_trivia() {
                return token;
            }
        }
    }
}
