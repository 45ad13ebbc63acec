//! Built-in languages and the extension registry.

use std::path::Path;
use std::sync::OnceLock;

use super::grammar::{
    ch, choice, not, range, repetition, sequence, text, Expr, Grammar,
};

mod c;
mod javascript;
mod python;
mod rust;

/// A language with a grammar. Word motion is a language hook as well; until
/// a grammar defines something better it is the identity, i.e. no movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    JavaScript,
    Python,
    Rust,
}

impl Language {
    /// Choose a language by file extension, case-insensitively. Unknown
    /// extensions get no language: zero spans and identity word motion.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "c" | "h" => Some(Language::C),
            "js" | "mjs" => Some(Language::JavaScript),
            "py" => Some(Language::Python),
            "rs" => Some(Language::Rust),
            _ => None,
        }
    }

    /// The language's grammar, built once per process.
    pub fn grammar(self) -> &'static Grammar {
        static C: OnceLock<Grammar> = OnceLock::new();
        static JAVASCRIPT: OnceLock<Grammar> = OnceLock::new();
        static PYTHON: OnceLock<Grammar> = OnceLock::new();
        static RUST: OnceLock<Grammar> = OnceLock::new();
        match self {
            Language::C => C.get_or_init(c::grammar),
            Language::JavaScript => JAVASCRIPT.get_or_init(javascript::grammar),
            Language::Python => PYTHON.get_or_init(python::grammar),
            Language::Rust => RUST.get_or_init(rust::grammar),
        }
    }

    /// Start of the previous word before `index`. Identity for now.
    pub fn prev_word(self, index: usize) -> usize {
        index
    }

    /// End of the next word after `index`. Identity for now.
    pub fn next_word(self, index: usize) -> usize {
        index
    }
}

// Identifier shapes shared by the C-family grammars.

pub(crate) fn identifier_begin_char() -> Expr {
    choice![range('a', 'z'), range('A', 'Z'), ch('_')]
}

pub(crate) fn identifier_char() -> Expr {
    choice![range('a', 'z'), range('A', 'Z'), ch('_'), range('0', '9')]
}

pub(crate) fn identifier() -> Expr {
    sequence![identifier_begin_char(), repetition(identifier_char())]
}

/// A token that must not run into a following identifier character.
pub(crate) fn keyword(token: Expr) -> Expr {
    sequence![token, not(identifier_char())]
}

pub(crate) fn keywords(words: &[&'static str]) -> Expr {
    Expr::Choice(words.iter().map(|w| keyword(text(w))).collect())
}

pub(crate) fn hex_digit() -> Expr {
    choice![range('0', '9'), range('a', 'f'), range('A', 'F')]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::Style;

    #[test]
    fn test_extension_registry() {
        assert_eq!(Language::from_path(Path::new("main.c")), Some(Language::C));
        assert_eq!(Language::from_path(Path::new("lib.h")), Some(Language::C));
        assert_eq!(Language::from_path(Path::new("app.RS")), Some(Language::Rust));
        assert_eq!(Language::from_path(Path::new("x.Py")), Some(Language::Python));
        assert_eq!(
            Language::from_path(Path::new("a.mjs")),
            Some(Language::JavaScript)
        );
        assert_eq!(Language::from_path(Path::new("notes.txt")), None);
        assert_eq!(Language::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_word_motion_defaults_to_identity() {
        assert_eq!(Language::Rust.prev_word(7), 7);
        assert_eq!(Language::C.next_word(0), 0);
    }

    #[test]
    fn test_c_keywords_and_comments() {
        let spans = Language::C.grammar().parse(b"if (x) { /* y */ return; }\n");
        let styled: Vec<(usize, usize, Style)> =
            spans.iter().map(|s| (s.start, s.end, s.style)).collect();
        assert!(styled.contains(&(0, 2, Style::Keyword)));
        assert!(styled.contains(&(9, 16, Style::Comment)));
        assert!(styled.iter().any(|s| s.2 == Style::Keyword && s.0 == 17));
    }

    #[test]
    fn test_c_keyword_needs_boundary() {
        // "iffy" must not light up as a keyword.
        let spans = Language::C.grammar().parse(b"iffy\n");
        assert!(spans.iter().all(|s| s.style != Style::Keyword));
    }

    #[test]
    fn test_c_string_and_number() {
        let spans = Language::C.grammar().parse(b"x = \"a\\\"b\" + 0x1f;\n");
        assert!(spans.iter().any(|s| s.style == Style::Str && (s.start, s.end) == (4, 10)));
        assert!(spans.iter().any(|s| s.style == Style::Literal && (s.start, s.end) == (13, 17)));
    }

    #[test]
    fn test_rust_nested_block_comment() {
        let input = b"/* a /* b */ c */ fn\n";
        let spans = Language::Rust.grammar().parse(input);
        assert!(spans
            .iter()
            .any(|s| s.style == Style::Comment && (s.start, s.end) == (0, 17)));
        assert!(spans
            .iter()
            .any(|s| s.style == Style::Keyword && (s.start, s.end) == (18, 20)));
    }

    #[test]
    fn test_rust_types_and_function_names() {
        let spans = Language::Rust.grammar().parse(b"fn add(a: u32) -> i64 {}\n");
        assert!(spans.iter().any(|s| s.style == Style::Function && (s.start, s.end) == (3, 6)));
        assert!(spans.iter().any(|s| s.style == Style::Type && (s.start, s.end) == (10, 13)));
        assert!(spans.iter().any(|s| s.style == Style::Type && (s.start, s.end) == (18, 21)));
    }

    #[test]
    fn test_python_comment_and_keywords() {
        let spans = Language::Python.grammar().parse(b"def f():  # note\n");
        assert!(spans.iter().any(|s| s.style == Style::Keyword && (s.start, s.end) == (0, 3)));
        assert!(spans.iter().any(|s| s.style == Style::Comment && (s.start, s.end) == (10, 16)));
    }

    #[test]
    fn test_javascript_literals() {
        let spans = Language::JavaScript.grammar().parse(b"let x = 0x1fn + null;\n");
        assert!(spans.iter().any(|s| s.style == Style::Keyword && (s.start, s.end) == (0, 3)));
        assert!(spans.iter().any(|s| s.style == Style::Literal && (s.start, s.end) == (8, 13)));
        assert!(spans.iter().any(|s| s.style == Style::Literal && (s.start, s.end) == (16, 20)));
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let spans = Language::C.grammar().parse(b"\"abc\nint x;\n");
        assert!(spans.iter().any(|s| s.style == Style::Str && (s.start, s.end) == (0, 4)));
        assert!(spans.iter().any(|s| s.style == Style::Type && (s.start, s.end) == (5, 8)));
    }
}
