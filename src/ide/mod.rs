//! Editor-facing analysis features.
//!
//! Everything in here is a pure function of a text snapshot (plus, for
//! diagnostics, the compiler's output): the host editor owns the buffers
//! and decides when to re-run analysis.
//!
//! - [`completion`] - context-aware name completion
//! - [`rename`] - editable segments for symbol rename
//! - [`diagnostics`] - mapping compiler output onto document locations

pub mod completion;
pub mod diagnostics;
pub mod rename;

pub use completion::{CompletionItem, CompletionProvider, Vocabulary};
pub use diagnostics::{BuildOutputParser, Diagnostic, Severity};
pub use rename::{RenameSegments, find_rename_segments};
