//! Extraction of delimited grammar names out of free-form message text.
//!
//! GOLDbuild diagnostics embed the offending symbol somewhere inside a
//! prose field (`Unused rule:<expr> is not reachable`). These helpers pull
//! the first delimited name out of such a string.

use std::sync::LazyLock;

use regex::Regex;

static NONTERMINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z0-9._\- ]+>").expect("valid regex"));
static SET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^{}]+\}").expect("valid regex"));
static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"']+""#).expect("valid regex"));
static TERMINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'[A-Za-z0-9._\-]+'").expect("valid regex"));

/// First `<...>` delimited nonterminal name, delimiters included.
pub fn find_nonterminal_name(text: &str) -> Option<&str> {
    NONTERMINAL_RE.find(text).map(|m| m.as_str())
}

/// First `{...}` delimited set name, delimiters included. Nested or
/// unbalanced braces do not match.
pub fn find_set_name(text: &str) -> Option<&str> {
    SET_RE.find(text).map(|m| m.as_str())
}

/// First `"..."` delimited property name, delimiters included.
pub fn find_property_name(text: &str) -> Option<&str> {
    PROPERTY_RE.find(text).map(|m| m.as_str())
}

/// First `'...'` quoted terminal name, with the quotes stripped.
pub fn find_terminal_name(text: &str) -> Option<&str> {
    TERMINAL_RE
        .find(text)
        .map(|m| m.as_str().trim_matches('\''))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alkdjfa<non-terminal>asldkj", Some("<non-terminal>"))]
    #[case("alkdjfa<non terminal>asldkj", Some("<non terminal>"))]
    #[case("alkdjfa<non.terminal>asldkj", Some("<non.terminal>"))]
    #[case("alkdjfa<non_terminal>asldkj", Some("<non_terminal>"))]
    #[case("no nonterminal here", None)]
    fn test_find_nonterminal_name(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(find_nonterminal_name(input), expected);
    }

    #[rstest]
    #[case("alkdjfa{setname}asldkj", Some("{setname}"))]
    #[case("alkdjfa{set!@#$W%^*() name}asldkj", Some("{set!@#$W%^*() name}"))]
    #[case("alkdjfa{set{}name}asldkj", None)]
    #[case("alkdjfa{set}{name}asldkj", Some("{set}"))]
    fn test_find_set_name(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(find_set_name(input), expected);
    }

    #[rstest]
    #[case("alkdjfa'terminal'asldkj", Some("terminal"))]
    #[case("alkdjfa'a12345terminal.-_'asldkj", Some("a12345terminal.-_"))]
    #[case("alkdjfa'my terminal'asldkj", None)]
    #[case("Duplicate definition for the terminal 'if' :", Some("if"))]
    fn test_find_terminal_name(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(find_terminal_name(input), expected);
    }

    #[rstest]
    #[case("alkdjfa\"grammar property\"asldkj", Some("\"grammar property\""))]
    #[case("alkdjfa\"grammar'property\"asldkj", None)]
    #[case("alkdjfa\"grammar\"property\"asldkj", Some("\"grammar\""))]
    fn test_find_property_name(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(find_property_name(input), expected);
    }
}
