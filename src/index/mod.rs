//! Document symbol index.
//!
//! One [`DocumentIndex`] per text snapshot: the ordered definitions and the
//! ordered token list, with the position/name/kind queries the ide layer is
//! built on.

mod document;

pub use document::{Definition, DocumentIndex};
