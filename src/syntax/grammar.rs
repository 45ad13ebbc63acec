//! Parsing-expression-grammar combinators and span extraction.
//!
//! A language grammar is a runtime tree of [`Expr`] nodes with PEG matching
//! semantics: ordered choice commits to the first alternative that succeeds,
//! repetition is greedy, and a failing expression restores the input position
//! and discards any spans it emitted tentatively. Matching runs over a byte
//! snapshot of the document and records, for every emitted span, the highest
//! input offset the parser had touched so far; the cache layer uses that
//! high-water-mark for invalidation.

/// Visual style of a span. `Word` marks word extents without colouring them;
/// `Default` is the plain-text sentinel. Everything above `Default` indexes
/// the theme's `styles` array at `value - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Style {
    Word,
    Default,
    Comment,
    Keyword,
    Operator,
    Type,
    Literal,
    Str,
    Function,
}

impl Style {
    /// Index into the theme's `styles` array; None for `Word`.
    pub fn theme_index(self) -> Option<usize> {
        (self as usize).checked_sub(1)
    }
}

/// A styled byte range, plus the parse progress needed to reproduce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    pub start: usize,
    pub end: usize,
    pub style: Style,
    /// Highest input offset touched while producing the span list up to and
    /// including this span.
    pub high_water_mark: usize,
}

/// A parsing expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Match one exact byte.
    Char(u8),
    /// Match one byte in an inclusive range.
    Range(u8, u8),
    /// Match an exact byte string.
    Str(&'static str),
    /// Match a byte string, ASCII case-insensitively.
    IStr(&'static str),
    /// Match any single byte.
    AnyChar,
    /// Match all parts in order; fails as a whole if any part fails.
    Seq(Vec<Expr>),
    /// Ordered choice: commit to the first part that succeeds.
    Choice(Vec<Expr>),
    /// Match the inner expression or nothing.
    Optional(Box<Expr>),
    /// Greedy zero-or-more repetition.
    Repeat(Box<Expr>),
    /// Negative lookahead: succeed without consuming iff the inner fails.
    Not(Box<Expr>),
    /// Reference to a named rule of the enclosing grammar (for recursion).
    Rule(usize),
    /// Style everything the inner expression consumes.
    Highlight(Style, Box<Expr>),
}

pub fn ch(c: char) -> Expr {
    debug_assert!(c.is_ascii());
    Expr::Char(c as u8)
}

pub fn range(lo: char, hi: char) -> Expr {
    debug_assert!(lo.is_ascii() && hi.is_ascii() && lo <= hi);
    Expr::Range(lo as u8, hi as u8)
}

pub fn text(s: &'static str) -> Expr {
    Expr::Str(s)
}

pub fn itext(s: &'static str) -> Expr {
    Expr::IStr(s)
}

pub fn any_char() -> Expr {
    Expr::AnyChar
}

pub fn optional(e: Expr) -> Expr {
    Expr::Optional(Box::new(e))
}

/// Greedy zero-or-more.
pub fn repetition(e: Expr) -> Expr {
    Expr::Repeat(Box::new(e))
}

pub fn one_or_more(e: Expr) -> Expr {
    Expr::Seq(vec![e.clone(), repetition(e)])
}

pub fn not(e: Expr) -> Expr {
    Expr::Not(Box::new(e))
}

/// Anything but `e`: a negative lookahead followed by any byte.
pub fn but(e: Expr) -> Expr {
    Expr::Seq(vec![not(e), any_char()])
}

pub fn highlight(style: Style, e: Expr) -> Expr {
    Expr::Highlight(style, Box::new(e))
}

pub fn rule(index: usize) -> Expr {
    Expr::Rule(index)
}

/// Variadic [`Expr::Seq`].
macro_rules! sequence {
    ($($e:expr),* $(,)?) => {
        $crate::syntax::grammar::Expr::Seq(vec![$($e),*])
    };
}
pub(crate) use sequence;

/// Variadic ordered [`Expr::Choice`].
macro_rules! choice {
    ($($e:expr),* $(,)?) => {
        $crate::syntax::grammar::Expr::Choice(vec![$($e),*])
    };
}
pub(crate) use choice;

/// A complete grammar: a top-level matcher plus named rules that expressions
/// can reference by index, which is how recursive constructs (e.g. nested
/// block comments) are tied.
pub struct Grammar {
    rules: Vec<Expr>,
    top: Expr,
}

impl Grammar {
    pub fn new(top: Expr) -> Self {
        Grammar {
            rules: Vec::new(),
            top,
        }
    }

    pub fn with_rules(rules: Vec<Expr>, top: Expr) -> Self {
        Grammar { rules, top }
    }

    /// Run the top-level matcher over `input` and flatten the result into
    /// non-overlapping styled spans. The top rule of every language is a
    /// greedy repetition with an any-byte fallback, so matching cannot fail.
    pub fn parse(&self, input: &[u8]) -> Vec<StyledSpan> {
        let mut matcher = Matcher {
            grammar: self,
            input,
            pos: 0,
            max_touched: 0,
            styles: Vec::new(),
            raw: Vec::new(),
        };
        let matched = matcher.matches(&self.top);
        debug_assert!(matched, "top-level matcher failed");

        // Flatten: keep visual styles only, merge contiguous equal-style runs.
        let mut spans: Vec<StyledSpan> = Vec::new();
        for raw in matcher.raw {
            let style = match raw.style {
                Some(style) if style > Style::Default => style,
                _ => continue,
            };
            if let Some(last) = spans.last_mut() {
                if last.style == style && last.end == raw.start {
                    last.end = raw.end;
                    last.high_water_mark = last.high_water_mark.max(raw.high_water_mark);
                    continue;
                }
            }
            spans.push(StyledSpan {
                start: raw.start,
                end: raw.end,
                style,
                high_water_mark: raw.high_water_mark,
            });
        }
        spans
    }
}

struct RawSpan {
    start: usize,
    end: usize,
    style: Option<Style>,
    high_water_mark: usize,
}

struct Matcher<'g, 'i> {
    grammar: &'g Grammar,
    input: &'i [u8],
    pos: usize,
    max_touched: usize,
    /// Stack of enclosing highlight styles; the top is the effective style.
    styles: Vec<Style>,
    raw: Vec<RawSpan>,
}

impl<'g, 'i> Matcher<'g, 'i> {
    /// Match `expr` at the current position. On failure the position and the
    /// emitted spans are restored; the touched high-water-mark is not, since
    /// the parser did observe those bytes.
    fn matches(&mut self, expr: &Expr) -> bool {
        match expr {
            Expr::Char(b) => self.eat(|x| x == *b),
            Expr::Range(lo, hi) => self.eat(|x| (*lo..=*hi).contains(&x)),
            Expr::Str(s) => self.eat_str(s.as_bytes(), false),
            Expr::IStr(s) => self.eat_str(s.as_bytes(), true),
            Expr::AnyChar => self.eat(|_| true),
            Expr::Seq(items) => {
                let mark = self.mark();
                for item in items {
                    if !self.matches(item) {
                        self.reset(mark);
                        return false;
                    }
                }
                true
            }
            Expr::Choice(items) => items.iter().any(|item| self.matches(item)),
            Expr::Optional(inner) => {
                self.matches(inner);
                true
            }
            Expr::Repeat(inner) => {
                loop {
                    let before = self.pos;
                    if !self.matches(inner) || self.pos == before {
                        break;
                    }
                }
                true
            }
            Expr::Not(inner) => {
                let mark = self.mark();
                let matched = self.matches(inner);
                self.reset(mark);
                !matched
            }
            Expr::Rule(index) => {
                let rule: &'g Expr = &self.grammar.rules[*index];
                self.matches(rule)
            }
            Expr::Highlight(style, inner) => {
                self.styles.push(*style);
                let matched = self.matches(inner);
                self.styles.pop();
                matched
            }
        }
    }

    fn mark(&self) -> (usize, usize) {
        (self.pos, self.raw.len())
    }

    fn reset(&mut self, mark: (usize, usize)) {
        self.pos = mark.0;
        self.raw.truncate(mark.1);
    }

    fn eat(&mut self, pred: impl Fn(u8) -> bool) -> bool {
        self.max_touched = self.max_touched.max(self.pos);
        match self.input.get(self.pos) {
            Some(&b) if pred(b) => {
                self.emit(self.pos, self.pos + 1);
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn eat_str(&mut self, s: &[u8], case_insensitive: bool) -> bool {
        for (k, expected) in s.iter().enumerate() {
            self.max_touched = self.max_touched.max(self.pos + k);
            match self.input.get(self.pos + k) {
                Some(b) if b == expected => {}
                Some(b) if case_insensitive && b.eq_ignore_ascii_case(expected) => {}
                _ => return false,
            }
        }
        self.emit(self.pos, self.pos + s.len());
        self.pos += s.len();
        true
    }

    fn emit(&mut self, start: usize, end: usize) {
        if start == end {
            return;
        }
        self.raw.push(RawSpan {
            start,
            end,
            style: self.styles.last().copied(),
            high_water_mark: self.max_touched,
        });
    }
}
