//! Case-insensitive name sets.

use rustc_hash::FxHashSet;

/// An unordered set of non-repeating, case-insensitive strings.
///
/// Used to deduplicate completion candidates, where `<Expr>` and `<expr>`
/// name the same symbol.
#[derive(Debug, Default)]
pub struct NameSet {
    normalized: FxHashSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. Returns `true` if the set did not already contain it.
    pub fn insert(&mut self, name: &str) -> bool {
        self.normalized.insert(name.to_lowercase())
    }

    /// True if the name is already present, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.normalized.contains(&name.to_lowercase())
    }
}
