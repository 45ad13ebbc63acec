//! vellum: a text-editing engine for code editors.
//!
//! The engine keeps a possibly-large document in a counted B-tree (byte,
//! codepoint, and newline counters at every node), edits it at any number of
//! selections simultaneously, highlights it with PEG-combinator grammars
//! behind an invalidation-aware span cache, and renders row ranges as JSON
//! line records for a host UI.
//!
//! ```
//! use vellum::Editor;
//!
//! let mut editor = Editor::new();
//! editor.insert_text("fn main() {}");
//! assert_eq!(editor.total_lines(), 1);
//! let json = editor.render_json(0, 1);
//! assert!(json.contains("fn main"));
//! ```

pub mod config;
pub mod editor;
pub mod model;
pub mod syntax;
pub mod view;

pub use config::Config;
pub use editor::Editor;
pub use model::{Selection, Selections, TextBuffer};
pub use syntax::{Language, Style, StyledSpan};
pub use view::{LineRecord, Theme};
