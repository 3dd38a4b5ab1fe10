//! Syntax kinds for the GOLD grammar meta-language token stream.
//!
//! Every token the lexer produces carries one of these kinds. The kind is
//! what drives all downstream heuristics: trivia filtering, statement
//! boundary detection, and the mapping to user-definable symbol categories.

/// All token kinds in the GOLD meta-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (recorded for position lookups, excluded from statement analysis)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT, // line comment `!...` or block comment `!* ... *!`

    // =========================================================================
    // STRUCTURE
    // =========================================================================
    NEWLINE, // \r\n, \r, or \n; a token of its own, not trivia

    // =========================================================================
    // USER-DEFINABLE NAMES
    // =========================================================================
    PARAMETER_NAME, // "Start Symbol"
    SET_NAME,       // {Digit}
    NONTERMINAL,    // <Expr>
    TERMINAL,       // bare identifier `if`, or quoted literal `'if'`
    SET_LITERAL,    // [abc]

    // =========================================================================
    // OPERATORS
    // =========================================================================
    EQ,             // =
    COLON_COLON_EQ, // ::=
    PIPE,           // |
    PLUS,           // +
    MINUS,          // -
    L_PAREN,        // (
    R_PAREN,        // )
    QUESTION,       // ?
    STAR,           // *

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR, // any character no rule accepts, including unterminated openers
    EOF,   // exactly one per token stream, even for empty input
}

/// Category of a user-defined grammar symbol.
///
/// One tagged kind rather than a type per category: all behavior keys off
/// the kind value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Property,
    SetName,
    Terminal,
    NonTerminal,
    None,
}

impl SyntaxKind {
    /// Whitespace or comment: kept in the token list for position-based
    /// lookups, skipped everywhere else.
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::WHITESPACE | SyntaxKind::COMMENT)
    }

    pub fn is_newline(self) -> bool {
        self == SyntaxKind::NEWLINE
    }

    pub fn is_eof(self) -> bool {
        self == SyntaxKind::EOF
    }

    /// A regular content token: not trivia, not an error, not end-of-input.
    pub fn is_content(self) -> bool {
        !self.is_trivia() && !matches!(self, SyntaxKind::ERROR | SyntaxKind::EOF)
    }

    /// Operators that may open a line continuing the previous statement.
    pub fn is_continuation_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EQ
                | SyntaxKind::COLON_COLON_EQ
                | SyntaxKind::PIPE
                | SyntaxKind::PLUS
                | SyntaxKind::MINUS
        )
    }

    /// The definition category this token kind can declare.
    ///
    /// Note that TERMINAL maps to [`DefinitionKind::Terminal`] whether the
    /// token is a bare name or a quoted literal; literal detection needs the
    /// token text and lives on [`Token`](super::Token).
    pub fn definition_kind(self) -> DefinitionKind {
        match self {
            SyntaxKind::PARAMETER_NAME => DefinitionKind::Property,
            SyntaxKind::SET_NAME => DefinitionKind::SetName,
            SyntaxKind::TERMINAL => DefinitionKind::Terminal,
            SyntaxKind::NONTERMINAL => DefinitionKind::NonTerminal,
            _ => DefinitionKind::None,
        }
    }
}
