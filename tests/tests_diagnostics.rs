//! Diagnostics Tests - Compiler Output Mapping
//!
//! These tests feed GOLDbuild-style output lines through the parser and
//! check the severity, cleaned message, and the document position each
//! problem is attached to.

use gold_meta::ide::{BuildOutputParser, Diagnostic, Severity};
use rstest::rstest;

/// Byte offsets are irrelevant here; what matters are the 1-based line and
/// column positions:
///   "Start Symbol" defined at (1,1), {Hex} at (2,1), `if` at (3,1) and
///   redefined at (4,1), <Expr> at (5,1), <Value> at (6,1);
///   {Digit} first used at (2,9), <Expr> at (1,18), `foo` at (6,16).
const GRAMMAR: &str = "\"Start Symbol\" = <Expr>\r\n\
                       {Hex} = {Digit} + [abcdef]\r\n\
                       if = 'if'\r\n\
                       if = 'IF'\r\n\
                       <Expr> ::= <Expr> '+' <Value>\r\n\
                       <Value> ::= if foo\r\n";

fn parse(raw: &str) -> Diagnostic {
    BuildOutputParser::from_text("sample.grm", GRAMMAR).parse_raw_message(raw)
}

// ============================================================================
// Locating problems
// ============================================================================

#[rstest]
#[case("ERROR:Parse:Undefined terminal: foo", 6, 16)]
#[case("ERROR:Grammar:Undefined rule: reference to <Expr> missing", 1, 18)]
#[case("ERROR:Grammar:Undefined Set: {Digit} is not defined", 2, 9)]
fn test_undefined_symbols_point_at_the_first_use(
    #[case] raw: &str,
    #[case] line: u32,
    #[case] column: u32,
) {
    let diagnostic = parse(raw);
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!((diagnostic.line, diagnostic.column), (line, column));
}

#[test]
fn test_unused_symbol_points_at_its_definition() {
    let diagnostic = parse("WARNING:Grammar:Unreachable rule: <Value> is not reachable");
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!((diagnostic.line, diagnostic.column), (6, 1));
}

#[test]
fn test_unused_symbol_without_definition_falls_back_to_first_use() {
    let diagnostic = parse("WARNING:Grammar:Unused terminal: foo");
    assert_eq!((diagnostic.line, diagnostic.column), (6, 16));
}

#[test]
fn test_start_symbol_problems_point_at_the_property() {
    let diagnostic = parse("ERROR:Grammar:The start symbol is not defined correctly");
    assert_eq!((diagnostic.line, diagnostic.column), (1, 1));
}

#[test]
fn test_duplicate_terminal_points_at_the_second_definition() {
    let diagnostic = parse("ERROR:Grammar:Duplicate definition for the terminal 'if' : see above");
    assert_eq!((diagnostic.line, diagnostic.column), (4, 1));
}

#[test]
fn test_dfa_conflict_points_at_the_first_listed_terminal() {
    let diagnostic = parse("ERROR:Compile:DFA State 35: Cannot distinguish between: if while");
    assert_eq!((diagnostic.line, diagnostic.column), (3, 1));
}

#[test]
fn test_unlocatable_problems_keep_position_zero() {
    let diagnostic = parse("ERROR:Parse:Something unexpected happened");
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!((diagnostic.line, diagnostic.column), (0, 0));
}

// ============================================================================
// Severity and message text
// ============================================================================

#[rstest]
#[case("ERROR:Parse:Undefined terminal: foo", Severity::Error)]
#[case("error:Parse:Undefined terminal: foo", Severity::Error)]
#[case("WARNING:Grammar:Unused terminal: foo", Severity::Warning)]
#[case("Grammar compiled with 0 errors", Severity::Info)]
fn test_severity_prefixes(#[case] raw: &str, #[case] severity: Severity) {
    assert_eq!(parse(raw).severity, severity);
}

#[test]
fn test_continuation_lines_become_unlocated_info() {
    let diagnostic = parse("Expecting: 'if' or <Value>");
    assert_eq!(diagnostic.severity, Severity::Info);
    assert_eq!((diagnostic.line, diagnostic.column), (0, 0));
    assert_eq!(diagnostic.text, "Expecting: 'if' or <Value>");
}

#[test]
fn test_message_drops_the_severity_and_category_fields() {
    let diagnostic = parse("ERROR:Parse:Undefined terminal: foo");
    assert_eq!(diagnostic.text, "Undefined terminal: foo");
    assert_eq!(diagnostic.raw, "ERROR:Parse:Undefined terminal: foo");
    assert_eq!(diagnostic.file, "sample.grm");
}

#[test]
fn test_parse_output_skips_blank_lines() {
    let parser = BuildOutputParser::from_text("sample.grm", GRAMMAR);
    let output = "Compiling grammar\r\n\r\nERROR:Parse:Undefined terminal: foo\r\nExpecting: 'if'\r\n";
    let diagnostics = parser.parse_output(output);
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics[0].severity, Severity::Info);
    assert_eq!(diagnostics[1].severity, Severity::Error);
    assert_eq!((diagnostics[1].line, diagnostics[1].column), (6, 16));
    assert_eq!(diagnostics[2].severity, Severity::Info);
}

#[test]
fn test_tool_failure_is_an_unlocated_error() {
    let diagnostic = Diagnostic::tool_failure("sample.grm", "GOLDbuild.exe not found");
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!((diagnostic.line, diagnostic.column), (0, 0));
    assert_eq!(diagnostic.text, "GOLDbuild.exe not found");
}

// ============================================================================
// Reading the grammar from disk
// ============================================================================

#[test]
fn test_from_grammar_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.grm");
    std::fs::write(&path, GRAMMAR).unwrap();

    let parser = BuildOutputParser::from_grammar_file(&path).unwrap();
    let diagnostic = parser.parse_raw_message("ERROR:Parse:Undefined terminal: foo");
    assert_eq!((diagnostic.line, diagnostic.column), (6, 16));
    assert_eq!(diagnostic.file, path.display().to_string());
}

#[test]
fn test_missing_grammar_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = BuildOutputParser::from_grammar_file(dir.path().join("missing.grm"));
    assert!(matches!(result, Err(gold_meta::Error::ReadGrammar { .. })));
}
