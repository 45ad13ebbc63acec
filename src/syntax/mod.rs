//! Syntax highlighting: PEG grammar combinators, built-in languages, and the
//! invalidation-aware span cache.

pub mod grammar;
pub mod highlighter;
pub mod languages;

pub use grammar::{Expr, Grammar, Style, StyledSpan};
pub use highlighter::Highlighter;
pub use languages::Language;
