//! Span cache over a language grammar.
//!
//! The cache keeps the last-computed span list. Every span carries the
//! high-water-mark of the parse that produced it, so an edit at offset `k`
//! can discard exactly the suffix whose production depended on bytes at or
//! past `k`. An incomplete cache is rebuilt from offset 0 on the next
//! request; highlighting is skipped entirely while the document is larger
//! than the configured threshold.

use crate::model::TextBuffer;

use super::grammar::StyledSpan;
use super::languages::Language;

pub struct Highlighter {
    language: Option<Language>,
    cache: Vec<StyledSpan>,
    complete: bool,
}

impl Highlighter {
    pub fn new(language: Option<Language>) -> Self {
        Highlighter {
            language,
            cache: Vec::new(),
            complete: false,
        }
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Discard all cached spans whose high-water-mark is at or past the
    /// edited offset. The spans before it stay valid: reproducing them could
    /// only have touched bytes below `offset`.
    pub fn invalidate(&mut self, offset: usize) {
        let keep = self
            .cache
            .partition_point(|span| span.high_water_mark < offset);
        if keep < self.cache.len() {
            tracing::debug!("invalidating {} cached spans", self.cache.len() - keep);
            self.cache.truncate(keep);
        }
        self.complete = false;
    }

    /// The current span list, reparsing when the cache is incomplete.
    pub fn spans(&mut self, buffer: &TextBuffer, threshold: usize) -> &[StyledSpan] {
        let Some(language) = self.language else {
            return &[];
        };
        if buffer.size() > threshold {
            // Large-file policy: no highlighting until the document shrinks
            // back under the threshold.
            return &[];
        }
        if !self.complete {
            let snapshot = buffer.to_bytes();
            self.cache = language.grammar().parse(&snapshot);
            self.complete = true;
            tracing::debug!(
                "reparsed {} bytes into {} spans",
                snapshot.len(),
                self.cache.len()
            );
        }
        &self.cache
    }

    #[cfg(test)]
    fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::grammar::Style;

    const THRESHOLD: usize = 10_000;

    fn buffer_and_highlighter(src: &str) -> (TextBuffer, Highlighter) {
        (
            TextBuffer::from_bytes(src.as_bytes()),
            Highlighter::new(Some(Language::Rust)),
        )
    }

    #[test]
    fn test_no_language_no_spans() {
        let buffer = TextBuffer::from_bytes(b"let x = 1;\n");
        let mut highlighter = Highlighter::new(None);
        assert!(highlighter.spans(&buffer, THRESHOLD).is_empty());
    }

    #[test]
    fn test_parse_is_lazy_and_cached() {
        let (buffer, mut highlighter) = buffer_and_highlighter("let x = 1;\n");
        assert_eq!(highlighter.cached_len(), 0);
        let count = highlighter.spans(&buffer, THRESHOLD).len();
        assert!(count > 0);
        assert_eq!(highlighter.cached_len(), count);
    }

    #[test]
    fn test_invalidate_truncates_suffix() {
        let (buffer, mut highlighter) = buffer_and_highlighter("let a = 1;\nlet b = 2;\n");
        highlighter.spans(&buffer, THRESHOLD);
        let full = highlighter.cached_len();
        highlighter.invalidate(12);
        let kept = highlighter.cached_len();
        assert!(kept < full);
        // Everything kept was produced from bytes strictly below the edit.
        // An edit at 0 clears the cache entirely.
        highlighter.invalidate(0);
        assert_eq!(highlighter.cached_len(), 0);
    }

    #[test]
    fn test_reparse_after_invalidate_matches_scratch_parse() {
        let (mut buffer, mut highlighter) = buffer_and_highlighter("let a = 1;\n");
        highlighter.spans(&buffer, THRESHOLD);
        buffer.insert_slice(4, b"bc");
        highlighter.invalidate(4);
        let incremental: Vec<_> = highlighter.spans(&buffer, THRESHOLD).to_vec();
        let mut rebuilt = Highlighter::new(Some(Language::Rust));
        let scratch: Vec<_> = rebuilt.spans(&buffer, THRESHOLD).to_vec();
        assert_eq!(incremental, scratch);
    }

    #[test]
    fn test_threshold_disables_highlighting() {
        let big = "x".repeat(THRESHOLD + 1);
        let buffer = TextBuffer::from_bytes(big.as_bytes());
        let mut highlighter = Highlighter::new(Some(Language::Rust));
        assert!(highlighter.spans(&buffer, THRESHOLD).is_empty());
        // A small buffer with the same highlighter parses normally.
        let small = TextBuffer::from_bytes(b"fn f() {}\n");
        assert!(!highlighter.spans(&small, THRESHOLD).is_empty());
    }

    #[test]
    fn test_keyword_span_styles() {
        let (buffer, mut highlighter) = buffer_and_highlighter("let x = true;\n");
        let spans = highlighter.spans(&buffer, THRESHOLD);
        assert!(spans.iter().any(|s| s.style == Style::Keyword && (s.start, s.end) == (0, 3)));
        assert!(spans.iter().any(|s| s.style == Style::Literal && (s.start, s.end) == (8, 12)));
    }
}
