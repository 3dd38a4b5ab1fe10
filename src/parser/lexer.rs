//! Logos-based lexer for the GOLD grammar meta-language.
//!
//! The lexer is total: any input, including text that is mid-edit and
//! nowhere near a valid grammar, produces a token stream. Characters no
//! rule accepts come out as [`SyntaxKind::ERROR`] tokens, one character at
//! a time, so an unterminated `'`, `"`, `{`, `<`, or `[` degrades to an
//! error token followed by whatever the rest of the line lexes to.

use logos::Logos;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::syntax_kind::{DefinitionKind, SyntaxKind};
use crate::base::Position;

/// A token with its kind, text, and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: SmolStr,
    pub position: Position,
}

impl Token {
    /// Token length in bytes.
    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte range this token covers.
    pub fn range(&self) -> TextRange {
        TextRange::at(self.position.offset, self.len())
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// A quoted terminal literal such as `'if'`, as opposed to a bare
    /// terminal name. Literals are inline patterns, never user-defined
    /// symbols.
    pub fn is_terminal_literal(&self) -> bool {
        self.kind == SyntaxKind::TERMINAL && self.text.starts_with('\'')
    }

    /// True if this token can open a declaration: a property, set name,
    /// bare terminal, or nonterminal.
    pub fn is_user_definable(&self) -> bool {
        self.definition_kind() != DefinitionKind::None && !self.is_terminal_literal()
    }

    /// Only some tokens are allowed to open a line that continues the
    /// statement from the previous line.
    pub fn is_line_continuation(&self) -> bool {
        self.kind.is_continuation_operator() || self.is_user_definable()
    }

    /// The definition category this token belongs to, [`DefinitionKind::None`]
    /// for operators, trivia, and errors.
    pub fn definition_kind(&self) -> DefinitionKind {
        self.kind.definition_kind()
    }
}

/// Lexer wrapping the logos-generated tokenizer, tracking line/column.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            line: 1,
            column: 1,
        }
    }

    /// Position just past the last token returned so far.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, TextSize::new(self.inner.span().end as u32))
    }

    fn advance_position(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.line += 1;
                    self.column = 1;
                }
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match result {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        let position = Position::new(self.line, self.column, offset);
        self.advance_position(text);

        Some(Token {
            kind,
            text: SmolStr::new(text),
            position,
        })
    }
}

/// Tokenize an entire string into a Vec, EOF token excluded.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t]+")]
    Whitespace,

    // Line comment `!...` (to end of line) or block comment `!* ... *!`.
    // An unterminated block comment swallows the rest of the input.
    #[token("!", lex_comment)]
    Comment,

    // =========================================================================
    // STRUCTURE
    // =========================================================================
    #[regex(r"\r\n|\r|\n")]
    Newline,

    // =========================================================================
    // NAMES AND LITERALS
    // =========================================================================
    #[regex(r#""[^"\r\n]*""#)]
    ParameterName,

    #[regex(r"\{[^{}\r\n]*\}")]
    SetName,

    #[regex(r"<[A-Za-z0-9._\- ]+>")]
    Nonterminal,

    // A bare terminal name, or a quoted terminal literal. GOLD allows
    // dots, underscores, and dashes inside terminal names, so `a-b` is one
    // terminal while a leading `-` is the set-difference operator.
    #[regex(r"[A-Za-z0-9][A-Za-z0-9._\-]*")]
    #[regex(r"'[^'\r\n]*'")]
    Terminal,

    #[regex(r"\[[^\]\r\n]*\]")]
    SetLiteral,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    #[token("::=")]
    ColonColonEq,
    #[token("=")]
    Eq,
    #[token("|")]
    Pipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("?")]
    Question,
    #[token("*")]
    Star,

    // Any other single character. Lowest priority, so it only fires when
    // nothing else matches.
    #[regex(r".", priority = 0)]
    ErrorChar,
}

fn lex_comment(lex: &mut logos::Lexer<LogosToken>) {
    let remainder = lex.remainder();
    if let Some(rest) = remainder.strip_prefix('*') {
        // block comment: consume through the closing `*!`, or everything
        match rest.find("*!") {
            Some(i) => lex.bump(1 + i + 2),
            None => lex.bump(remainder.len()),
        }
    } else {
        // line comment: consume up to, excluding, the newline
        let end = remainder.find(['\r', '\n']).unwrap_or(remainder.len());
        lex.bump(end);
    }
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::Comment => SyntaxKind::COMMENT,
            LogosToken::Newline => SyntaxKind::NEWLINE,
            LogosToken::ParameterName => SyntaxKind::PARAMETER_NAME,
            LogosToken::SetName => SyntaxKind::SET_NAME,
            LogosToken::Nonterminal => SyntaxKind::NONTERMINAL,
            LogosToken::Terminal => SyntaxKind::TERMINAL,
            LogosToken::SetLiteral => SyntaxKind::SET_LITERAL,
            LogosToken::ColonColonEq => SyntaxKind::COLON_COLON_EQ,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::ErrorChar => SyntaxKind::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_terminal_declaration() {
        let tokens = tokenize("if = 'if'");
        let expected = [
            (SyntaxKind::TERMINAL, "if"),
            (SyntaxKind::WHITESPACE, " "),
            (SyntaxKind::EQ, "="),
            (SyntaxKind::WHITESPACE, " "),
            (SyntaxKind::TERMINAL, "'if'"),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, text)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.text, text);
        }
        assert!(tokens[4].is_terminal_literal());
        assert!(!tokens[0].is_terminal_literal());
    }

    #[test]
    fn test_lex_rule_declaration() {
        assert_eq!(
            kinds("<Expr> ::= <Expr> '+' <Add> | x"),
            vec![
                SyntaxKind::NONTERMINAL,
                SyntaxKind::WHITESPACE,
                SyntaxKind::COLON_COLON_EQ,
                SyntaxKind::WHITESPACE,
                SyntaxKind::NONTERMINAL,
                SyntaxKind::WHITESPACE,
                SyntaxKind::TERMINAL,
                SyntaxKind::WHITESPACE,
                SyntaxKind::NONTERMINAL,
                SyntaxKind::WHITESPACE,
                SyntaxKind::PIPE,
                SyntaxKind::WHITESPACE,
                SyntaxKind::TERMINAL,
            ]
        );
    }

    #[test]
    fn test_lex_set_declaration() {
        assert_eq!(
            kinds("{Hex Ch} = {Digit} + [abcdef]"),
            vec![
                SyntaxKind::SET_NAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::EQ,
                SyntaxKind::WHITESPACE,
                SyntaxKind::SET_NAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::PLUS,
                SyntaxKind::WHITESPACE,
                SyntaxKind::SET_LITERAL,
            ]
        );
    }

    #[test]
    fn test_lex_invalid_char_is_single_error() {
        assert_eq!(kinds("\0"), vec![SyntaxKind::ERROR]);
        assert_eq!(kinds("%{set}"), vec![SyntaxKind::ERROR, SyntaxKind::SET_NAME]);
    }

    #[test]
    fn test_lex_unterminated_literal() {
        // the lone quote is an error, the rest lexes on its own
        assert_eq!(
            kinds("'inaliteral"),
            vec![SyntaxKind::ERROR, SyntaxKind::TERMINAL]
        );
    }

    #[test]
    fn test_lex_block_comment_spans_lines() {
        let tokens = tokenize("!* block comment \r\n*!<nonTerminal>");
        assert_eq!(tokens[0].kind, SyntaxKind::COMMENT);
        assert_eq!(tokens[0].text, "!* block comment \r\n*!");
        assert_eq!(tokens[1].kind, SyntaxKind::NONTERMINAL);
    }

    #[test]
    fn test_lex_unterminated_block_comment() {
        let tokens = tokenize("!* block comment \r\n<nonTerminal>");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::COMMENT);
    }

    #[test]
    fn test_lex_line_comment_stops_at_newline() {
        let tokens = tokenize("!comment <a>\r\nif");
        assert_eq!(tokens[0].kind, SyntaxKind::COMMENT);
        assert_eq!(tokens[0].text, "!comment <a>");
        assert_eq!(tokens[1].kind, SyntaxKind::NEWLINE);
        assert_eq!(tokens[2].kind, SyntaxKind::TERMINAL);
    }

    #[test]
    fn test_lex_dashed_terminal_name() {
        assert_eq!(kinds("a-b"), vec![SyntaxKind::TERMINAL]);
        assert_eq!(
            kinds("{a} - {b}"),
            vec![
                SyntaxKind::SET_NAME,
                SyntaxKind::WHITESPACE,
                SyntaxKind::MINUS,
                SyntaxKind::WHITESPACE,
                SyntaxKind::SET_NAME,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("if='if'\r\n<expr>");
        let nonterminal = tokens.last().unwrap();
        assert_eq!(nonterminal.kind, SyntaxKind::NONTERMINAL);
        assert_eq!(nonterminal.position.line, 2);
        assert_eq!(nonterminal.position.column, 1);
        assert_eq!(nonterminal.position.offset, TextSize::new(9));

        let literal = &tokens[2];
        assert_eq!(literal.text, "'if'");
        assert_eq!(literal.position.line, 1);
        assert_eq!(literal.position.column, 4);
        assert_eq!(literal.position.offset, TextSize::new(3));
    }
}
