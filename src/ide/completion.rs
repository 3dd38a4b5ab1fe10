//! Context-aware name completion.
//!
//! Completion applies in four declaration contexts, keyed off the trigger
//! character and the opening tokens of the current line:
//!
//! | trigger    | context              | candidates                       |
//! |------------|----------------------|----------------------------------|
//! | `<`        | rule declaration     | nonterminal uses, plus `<>`      |
//! | alphanum.  | rule declaration     | defined terminals                |
//! | `{`        | terminal declaration | defined sets + built-in sets     |
//! | alphanum.  | terminal declaration | defined terminals                |
//! | `{`        | set declaration      | defined sets + built-in sets     |
//! | `"`        | new declaration      | built-in properties              |
//! | `<`        | new declaration      | nonterminal uses (no `<>`)       |
//!
//! Sets and terminals are offered only once defined; nonterminals are
//! offered from any use in the document, defined or not.

use smol_str::SmolStr;

use crate::base::NameSet;
use crate::index::DocumentIndex;
use crate::parser::{DefinitionKind, SyntaxKind, TokenStream};
use text_size::TextSize;

/// The fixed built-in property names of the meta-language.
const BUILTIN_PROPERTIES: [&str; 9] = [
    "Name",
    "Version",
    "Author",
    "About",
    "Case Sensitive",
    "Character Mapping",
    "Auto Whitespace",
    "Virtual Terminals",
    "Start Symbol",
];

/// The fixed predefined character-set names of the meta-language.
const BUILTIN_CHARACTER_SETS: [&str; 29] = [
    "HT",
    "LF",
    "VT",
    "FF",
    "CR",
    "Space",
    "NBSP",
    "LS",
    "PS",
    "Number",
    "Digit",
    "Letter",
    "AlphaNumeric",
    "Printable",
    "LetterExtended",
    "PrintableExtended",
    "WhiteSpace",
    "All Latin",
    "All Letters",
    "All Printable",
    "All Space",
    "All Newline",
    "All WhiteSpace",
    "All Valid",
    "ANSI Mapped",
    "ANSI Printable",
    "Control Codes",
    "Euro Sign",
    "Formatting",
];

/// Built-in completion vocabularies, display-ready (properties quoted,
/// character sets braced).
///
/// Constructed once and injected rather than read from global state, so
/// tests can substitute their own lists.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub properties: Vec<SmolStr>,
    pub character_sets: Vec<SmolStr>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            properties: BUILTIN_PROPERTIES
                .iter()
                .map(|name| SmolStr::new(format!("\"{name}\"")))
                .collect(),
            character_sets: BUILTIN_CHARACTER_SETS
                .iter()
                .map(|name| SmolStr::new(format!("{{{name}}}")))
                .collect(),
        }
    }
}

/// A completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to display and insert, delimiters included.
    pub label: SmolStr,
    pub kind: DefinitionKind,
}

impl CompletionItem {
    fn new(label: impl Into<SmolStr>, kind: DefinitionKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

/// Semantic context of the line being completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    RuleDeclaration,
    TerminalDeclaration,
    SetDeclaration,
    NewDeclaration,
    Unknown,
}

/// Completion candidates for one text snapshot.
pub struct CompletionProvider<'a> {
    text: &'a str,
    index: DocumentIndex,
    vocabulary: Vocabulary,
}

impl<'a> CompletionProvider<'a> {
    /// Build a provider over `text`, parsing a fresh index.
    pub fn new(text: &'a str) -> Self {
        Self::with_index(DocumentIndex::parse(text), text)
    }

    /// Build a provider reusing an index the host already parsed for this
    /// same snapshot.
    pub fn with_index(index: DocumentIndex, text: &'a str) -> Self {
        Self {
            text,
            index,
            vocabulary: Vocabulary::default(),
        }
    }

    /// Substitute the built-in vocabularies.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// The completion list for the trigger character at `offset`, or
    /// `None` when completion does not apply there.
    pub fn completions_at(&self, offset: TextSize) -> Option<Vec<CompletionItem>> {
        let offset = u32::from(offset) as usize;
        if offset >= self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }
        let trigger = self.text[offset..].chars().next()?;
        if !is_valid_trigger(trigger) {
            return None;
        }

        let line = self.line_up_to(offset, trigger);
        if is_terminal_literal_start(line) {
            return None;
        }

        let context = self.context_at(offset, line, trigger);
        self.candidates(trigger, context)
    }

    /// The current line from its start through the trigger character.
    fn line_up_to(&self, offset: usize, trigger: char) -> &str {
        let start = self.text[..offset].rfind(['\r', '\n']).map_or(0, |i| i + 1);
        &self.text[start..offset + trigger.len_utf8()]
    }

    fn context_at(&self, offset: usize, line: &str, trigger: char) -> Context {
        if self.in_comment(offset) {
            return Context::Unknown;
        }

        // classify off the line without the trigger character
        let mut stream = TokenStream::new(&line[..line.len() - trigger.len_utf8()]);
        let first = stream.next_significant();

        if first.is_user_definable() {
            let second = stream.next_significant();
            if second.kind == SyntaxKind::EQ {
                match first.definition_kind() {
                    DefinitionKind::Terminal => Context::TerminalDeclaration,
                    DefinitionKind::SetName => Context::SetDeclaration,
                    _ => Context::Unknown,
                }
            } else if second.kind == SyntaxKind::COLON_COLON_EQ
                && first.definition_kind() == DefinitionKind::NonTerminal
            {
                Context::RuleDeclaration
            } else {
                Context::Unknown
            }
        } else if first.kind == SyntaxKind::PIPE {
            Context::RuleDeclaration
        } else if first.kind.is_eof() {
            Context::NewDeclaration
        } else {
            Context::Unknown
        }
    }

    fn in_comment(&self, offset: usize) -> bool {
        self.index
            .token_at(TextSize::new(offset as u32))
            .is_some_and(|token| token.is_trivia())
    }

    fn candidates(&self, trigger: char, context: Context) -> Option<Vec<CompletionItem>> {
        let alphanumeric = trigger.is_alphanumeric();

        match context {
            Context::RuleDeclaration if trigger == '<' => {
                // rules may reference undefined nonterminals, and the empty
                // nonterminal is valid only here
                let mut items = self.nonterminal_candidates();
                items.push(CompletionItem::new("<>", DefinitionKind::NonTerminal));
                Some(items)
            }
            Context::RuleDeclaration if alphanumeric => {
                Some(self.defined_candidates(DefinitionKind::Terminal))
            }
            Context::TerminalDeclaration | Context::SetDeclaration if trigger == '{' => {
                Some(self.set_candidates())
            }
            Context::TerminalDeclaration if alphanumeric => {
                Some(self.defined_candidates(DefinitionKind::Terminal))
            }
            Context::NewDeclaration if trigger == '"' => Some(
                self.vocabulary
                    .properties
                    .iter()
                    .map(|name| CompletionItem::new(name.clone(), DefinitionKind::Property))
                    .collect(),
            ),
            Context::NewDeclaration if trigger == '<' => Some(self.nonterminal_candidates()),
            _ => None,
        }
    }

    /// Every nonterminal that appears anywhere in the document, defined or
    /// not, deduplicated case-insensitively.
    fn nonterminal_candidates(&self) -> Vec<CompletionItem> {
        let mut seen = NameSet::new();
        let mut items = Vec::new();
        for token in self.index.tokens_by_kind(DefinitionKind::NonTerminal) {
            // literal expressions never name a symbol
            if !token.text.starts_with('\'') && seen.insert(&token.text) {
                items.push(CompletionItem::new(
                    token.text.clone(),
                    DefinitionKind::NonTerminal,
                ));
            }
        }
        items
    }

    /// Only symbols that have been defined, in declaration order.
    fn defined_candidates(&self, kind: DefinitionKind) -> Vec<CompletionItem> {
        let mut seen = NameSet::new();
        let mut items = Vec::new();
        for def in self.index.definitions_by_kind(kind) {
            if seen.insert(&def.name) {
                items.push(CompletionItem::new(def.name.clone(), kind));
            }
        }
        items
    }

    /// Defined set names first, then the built-in character sets.
    fn set_candidates(&self) -> Vec<CompletionItem> {
        let mut seen = NameSet::new();
        let mut items = Vec::new();
        for def in self.index.definitions_by_kind(DefinitionKind::SetName) {
            if seen.insert(&def.name) {
                items.push(CompletionItem::new(def.name.clone(), DefinitionKind::SetName));
            }
        }
        for name in &self.vocabulary.character_sets {
            if seen.insert(name) {
                items.push(CompletionItem::new(name.clone(), DefinitionKind::SetName));
            }
        }
        items
    }
}

fn is_valid_trigger(c: char) -> bool {
    c == '{' || c == '<' || c == '"' || c.is_alphanumeric()
}

/// Detect a cursor sitting inside an unterminated terminal literal: the
/// line's token sequence ends with an error token, one content token, and
/// end-of-input.
fn is_terminal_literal_start(line: &str) -> bool {
    let mut stream = TokenStream::new(line);
    let mut tokens = Vec::new();
    loop {
        let token = stream.next_token();
        let done = token.kind.is_eof();
        tokens.push(token);
        if done {
            break;
        }
    }

    let [.., third_last, second_last, _eof] = tokens.as_slice() else {
        return false;
    };
    third_last.kind == SyntaxKind::ERROR && second_last.kind.is_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_counts() {
        let vocabulary = Vocabulary::default();
        assert_eq!(vocabulary.properties.len(), 9);
        assert_eq!(vocabulary.character_sets.len(), 29);
        assert!(vocabulary.properties.iter().any(|p| p == "\"Start Symbol\""));
        assert!(vocabulary.character_sets.iter().any(|s| s == "{Digit}"));
    }

    #[test]
    fn test_literal_start_detection() {
        assert!(is_terminal_literal_start("keyword = 'w"));
        assert!(is_terminal_literal_start("keyword = !*'*!'i"));
        assert!(!is_terminal_literal_start("keyword = "));
        assert!(!is_terminal_literal_start("<"));
        assert!(!is_terminal_literal_start(""));
    }

    #[test]
    fn test_substituted_vocabulary() {
        let vocabulary = Vocabulary {
            properties: vec![SmolStr::new("\"Only One\"")],
            character_sets: Vec::new(),
        };
        let text = "\"";
        let provider = CompletionProvider::new(text).with_vocabulary(vocabulary);
        let items = provider.completions_at(TextSize::new(0)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "\"Only One\"");
        assert_eq!(items[0].kind, DefinitionKind::Property);
    }
}
