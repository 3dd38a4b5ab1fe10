//! Mapping compiler output messages onto document locations.
//!
//! The grammar compiler reports problems as flat text lines with no
//! positions in them. [`BuildOutputParser`] classifies each line, extracts
//! the offending symbol name from the message text, and finds the position
//! to attach via the document index. A message it cannot place is still
//! reported, at line and column zero.

use std::path::Path;

use crate::Error;
use crate::base::Position;
use crate::base::text::{
    find_nonterminal_name, find_property_name, find_set_name, find_terminal_name,
};
use crate::index::DocumentIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One build problem, located in the grammar file when possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The problem text with the severity and category prefix removed.
    pub text: String,
    pub file: String,
    /// 1-based, or 0 when the message could not be located.
    pub line: u32,
    /// 1-based, or 0 when the message could not be located.
    pub column: u32,
    /// The compiler line as received.
    pub raw: String,
}

impl Diagnostic {
    /// An error that is about the build itself rather than the grammar,
    /// such as the compiler binary failing to start.
    pub fn tool_failure(file: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            severity: Severity::Error,
            raw: message.clone(),
            text: message,
            file: file.into(),
            line: 0,
            column: 0,
        }
    }
}

/// Parses the compiler's output against one grammar document.
pub struct BuildOutputParser {
    file: String,
    index: DocumentIndex,
}

impl BuildOutputParser {
    /// Read the grammar file the compiler ran on and index it.
    pub fn from_grammar_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        Ok(Self {
            file: path.display().to_string(),
            index: DocumentIndex::parse_file(path)?,
        })
    }

    /// Index `text` directly, reporting problems against `file`.
    pub fn from_text(file: impl Into<String>, text: &str) -> Self {
        Self {
            file: file.into(),
            index: DocumentIndex::parse(text),
        }
    }

    /// Every non-empty line of `output` as a diagnostic, in order.
    pub fn parse_output(&self, output: &str) -> Vec<Diagnostic> {
        output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_raw_message(line))
            .collect()
    }

    /// Classify and locate one compiler output line.
    pub fn parse_raw_message(&self, raw: &str) -> Diagnostic {
        let severity = severity_of(raw);

        // continuation lines repeat context for the problem above them and
        // informational lines carry no symbol to search for
        if severity == Severity::Info || is_continuation(raw) {
            return Diagnostic {
                severity: Severity::Info,
                text: raw.trim().to_string(),
                file: self.file.clone(),
                line: 0,
                column: 0,
                raw: raw.to_string(),
            };
        }

        let body = problem_text(raw);
        let fields: Vec<&str> = body
            .split(':')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect();
        let problem_type = fields.first().copied().unwrap_or_default();
        let description = fields.get(1).copied().unwrap_or_default();

        let position = self.locate(problem_type, description, &fields);
        let (line, column) = position.map_or((0, 0), |p| (p.line, p.column));

        Diagnostic {
            severity,
            text: body.to_string(),
            file: self.file.clone(),
            line,
            column,
            raw: raw.to_string(),
        }
    }

    fn locate(&self, problem_type: &str, description: &str, fields: &[&str]) -> Option<Position> {
        if problem_type.contains("DFA") && description.contains("Cannot distinguish between") {
            // the conflicting terminals are listed space-separated in the
            // next field; the first one is as good a place as any
            let listing = fields.get(2)?;
            let name = listing.split_whitespace().next()?;
            return self.first_definition(name);
        }
        if problem_type.contains("Undefined") {
            let name = extract_name(problem_type, description)?;
            return self.first_use(name);
        }
        if problem_type.contains("Unused") || problem_type.contains("Unreachable") {
            let name = extract_name(problem_type, description)?;
            return self.first_definition(name).or_else(|| self.first_use(name));
        }
        if problem_type.contains("start symbol") {
            return self
                .index
                .definitions_by_name("\"Start Symbol\"")
                .next()
                .map(|def| def.location);
        }
        if problem_type.contains("Duplicate") || problem_type.contains("redefined") {
            // duplicate-terminal messages quote the name in the type field
            let name = find_terminal_name(problem_type)
                .or_else(|| extract_name(problem_type, description))?;
            return self.second_definition(name);
        }

        tracing::debug!(problem_type, "no location rule for compiler message");
        None
    }

    fn first_use(&self, name: &str) -> Option<Position> {
        if name.is_empty() {
            return None;
        }
        self.index.uses_of(name).next().map(|token| token.position)
    }

    fn first_definition(&self, name: &str) -> Option<Position> {
        self.index
            .definitions_by_name(name)
            .next()
            .map(|def| def.location)
    }

    fn second_definition(&self, name: &str) -> Option<Position> {
        self.index
            .definitions_by_name(name)
            .nth(1)
            .map(|def| def.location)
    }
}

fn severity_of(raw: &str) -> Severity {
    let trimmed = raw.trim_start();
    let head = trimmed.get(..5).unwrap_or(trimmed);
    if head.eq_ignore_ascii_case("ERROR") || is_continuation(raw) {
        Severity::Error
    } else if trimmed
        .get(..7)
        .unwrap_or(trimmed)
        .eq_ignore_ascii_case("WARNING")
    {
        Severity::Warning
    } else {
        Severity::Info
    }
}

/// Continuation lines enumerate the tokens the compiler expected next.
fn is_continuation(raw: &str) -> bool {
    raw.trim_start().starts_with("Expecting")
}

/// The message with its severity and category fields removed: everything
/// after the second colon, or the whole line when it has fewer.
fn problem_text(raw: &str) -> &str {
    raw.splitn(3, ':').nth(2).unwrap_or(raw).trim()
}

/// The symbol name a message is about, extracted according to the problem
/// category named in the type field.
fn extract_name<'a>(problem_type: &str, description: &'a str) -> Option<&'a str> {
    if problem_type.contains("terminal") {
        let name = description.trim();
        (!name.is_empty()).then_some(name)
    } else if problem_type.contains("rule") {
        find_nonterminal_name(description)
    } else if problem_type.contains("Set") {
        find_set_name(description)
    } else if problem_type.contains("property") {
        find_property_name(description)
    } else {
        None
    }
}
