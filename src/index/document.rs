//! Error-tolerant symbol index over one document snapshot.
//!
//! [`DocumentIndex::parse`] consumes the full token stream once and builds
//! two collections: the ordered list of recognized [`Definition`]s and the
//! ordered list of every token, trivia included. The document usually does
//! not parse as a complete grammar while it is being edited; the index
//! still has to surface whatever definitions can be determined.
//!
//! Statement boundaries are heuristic. A line opens a new statement when it
//! does not start with one of the continuation openers (`=`, `::=`, `|`,
//! `+`, `-`), or when it starts with a user-definable name, which always
//! closes the statement before it. Rule bodies, set unions, and terminal
//! patterns may therefore span lines, while a stray invalid line simply
//! fails to produce a definition.

use std::fs;
use std::path::Path;

use smol_str::SmolStr;
use text_size::TextSize;

use crate::Error;
use crate::base::{Position, eq_ignore_case};
use crate::parser::{DefinitionKind, SyntaxKind, Token, TokenStream};

/// One recognized declaration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// The name as written. Delimiters are part of the name for properties,
    /// sets, and nonterminals; bare terminal names carry none.
    pub name: SmolStr,
    pub kind: DefinitionKind,
    /// Position of the defining token.
    pub location: Position,
    /// Bytes from the defining token's start through the end of the last
    /// token of the statement.
    pub length: TextSize,
}

impl Definition {
    pub fn offset(&self) -> TextSize {
        self.location.offset
    }
}

/// Symbol index for a single text snapshot.
///
/// Built in one pass and never mutated afterwards; a re-parse constructs a
/// fresh index. Concurrent read-only queries are safe.
#[derive(Debug, Default)]
pub struct DocumentIndex {
    definitions: Vec<Definition>,
    tokens: Vec<Token>,
}

impl DocumentIndex {
    /// Tokenize `text` and build the index. Accepts any input, including
    /// empty or malformed grammars; unrecognizable statements simply yield
    /// no definitions.
    pub fn parse(text: &str) -> Self {
        let mut index = DocumentIndex::default();
        let mut stream = TokenStream::new(text);
        let mut statement: Vec<Token> = Vec::new();
        let mut previous: Option<Token> = None;

        loop {
            let token = stream.next_token();
            let done = token.kind.is_eof();

            if !token.is_trivia() {
                if !token.kind.is_newline() {
                    if done || is_statement_start(&token, previous.as_ref()) {
                        index.flush_statement(&mut statement);
                    }
                    statement.push(token.clone());
                }
                previous = Some(token.clone());
            }
            index.tokens.push(token);

            if done {
                break;
            }
        }

        tracing::debug!(
            tokens = index.tokens.len(),
            definitions = index.definitions.len(),
            "document index rebuilt"
        );
        index
    }

    /// Read a grammar file and build the index from its contents.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ReadGrammar {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    fn flush_statement(&mut self, statement: &mut Vec<Token>) {
        if let Some(definition) = definition_from_statement(statement) {
            self.definitions.push(definition);
        }
        statement.clear();
    }

    /// All recognized definitions, in declaration order.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Every token of the document, trivia and EOF included, in document
    /// order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Definitions of the given kind, in declaration order.
    pub fn definitions_by_kind(&self, kind: DefinitionKind) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter(move |def| def.kind == kind)
    }

    /// Definitions matching `name` case-insensitively, in declaration
    /// order. Names are delimited for properties, sets, and nonterminals;
    /// terminal names are bare. A second match means a redefinition.
    pub fn definitions_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Definition> {
        self.definitions
            .iter()
            .filter(move |def| eq_ignore_case(&def.name, name))
    }

    /// Every token whose text matches `name` case-insensitively, the
    /// defining occurrence included, in document order.
    pub fn uses_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Token> {
        self.tokens
            .iter()
            .filter(move |token| eq_ignore_case(&token.text, name))
    }

    /// Tokens whose kind maps to the given definition category, whether or
    /// not the symbol was ever formally defined.
    pub fn tokens_by_kind(&self, kind: DefinitionKind) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(move |token| token.definition_kind() == kind)
    }

    /// The token covering the given byte offset, if any.
    pub fn token_at(&self, offset: TextSize) -> Option<&Token> {
        for token in &self.tokens {
            let start = token.position.offset;
            if start > offset {
                // tokens are position-ordered; it's not here
                return None;
            }
            if !token.is_empty() && offset < start + token.len() {
                return Some(token);
            }
        }
        None
    }

    /// The definition whose statement covers the given byte offset, if
    /// any. Multi-line statements (rule continuations) count as covered.
    pub fn definition_at(&self, offset: TextSize) -> Option<&Definition> {
        for def in &self.definitions {
            let start = def.offset();
            if start > offset {
                return None;
            }
            if offset <= start + def.length {
                return Some(def);
            }
        }
        None
    }
}

fn is_statement_start(token: &Token, previous: Option<&Token>) -> bool {
    previous.is_some_and(|prev| prev.kind.is_newline())
        && (token.is_user_definable() || !token.is_line_continuation())
}

fn definition_from_statement(statement: &[Token]) -> Option<Definition> {
    // at least `name op` is needed for every declaration
    let [first, second, ..] = statement else {
        return None;
    };

    let kind = match (first.definition_kind(), second.kind) {
        (DefinitionKind::NonTerminal, SyntaxKind::COLON_COLON_EQ) => DefinitionKind::NonTerminal,
        (DefinitionKind::SetName, SyntaxKind::EQ) => DefinitionKind::SetName,
        (DefinitionKind::Property, SyntaxKind::EQ) => DefinitionKind::Property,
        (DefinitionKind::Terminal, SyntaxKind::EQ) if !first.is_terminal_literal() => {
            DefinitionKind::Terminal
        }
        _ => return None,
    };

    let last = statement.last()?;
    Some(Definition {
        name: first.text.clone(),
        kind,
        location: first.position,
        length: last.position.offset + last.len() - first.position.offset,
    })
}
