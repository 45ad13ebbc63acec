//! The editor: owns the buffer, the selections, and the syntax cache, and
//! exposes the command surface the host drives.
//!
//! Commands are atomic with respect to observers: within a command every
//! buffer and selection mutation completes before anything can be rendered,
//! and rendering itself is a pure query over committed state. Bulk edits
//! follow the batch protocol: selections are walked in ascending order,
//! rebased by the insertions and deletions performed so far, edited, and the
//! whole set is collapsed once at the end.

use std::path::Path;

use crate::config::Config;
use crate::model::{Selection, Selections, TextBuffer};
use crate::syntax::{Highlighter, Language};
use crate::view::{LineRecord, Theme};

pub struct Editor {
    buffer: TextBuffer,
    selections: Selections,
    highlighter: Highlighter,
    theme: Theme,
    config: Config,
}

impl Editor {
    /// An empty editor: a single-newline buffer, no language.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let theme = Theme::from_name(&config.theme);
        Editor {
            buffer: TextBuffer::new(),
            selections: Selections::new(),
            highlighter: Highlighter::new(None),
            theme,
            config,
        }
    }

    /// An editor over initial content, with no language bound. The trailing
    /// newline is synthesised only when the content lacks one.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let config = Config::default();
        let theme = Theme::from_name(&config.theme);
        Editor {
            buffer: TextBuffer::from_bytes(bytes),
            selections: Selections::new(),
            highlighter: Highlighter::new(None),
            theme,
            config,
        }
    }

    /// Load a file and bind its language by extension. On error nothing is
    /// constructed; the caller keeps no partial state.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_file_with_config(path, Config::default())
    }

    pub fn from_file_with_config<P: AsRef<Path>>(path: P, config: Config) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let buffer = TextBuffer::from_file(path)?;
        let language = Language::from_path(path);
        if language.is_none() {
            tracing::warn!("no language for {}", path.display());
        }
        let theme = Theme::from_name(&config.theme);
        Ok(Editor {
            buffer,
            selections: Selections::new(),
            highlighter: Highlighter::new(language),
            theme,
            config,
        })
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn language(&self) -> Option<Language> {
        self.highlighter.language()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn total_lines(&self) -> usize {
        self.buffer.total_lines()
    }

    /// Write the document to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        self.buffer.save(path)
    }

    // --- editing commands ---

    /// Replace every selection with `text`.
    pub fn insert_text(&mut self, text: &str) {
        self.replace_at_selections(&[text.as_bytes()], false);
    }

    /// Replace every selection with a newline, then copy the previous line's
    /// leading blanks (auto-indent).
    pub fn insert_newline(&mut self) {
        let mut inserted = 0usize;
        let mut deleted = 0usize;
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            sel.shift_forward(inserted);
            sel.shift_back(deleted);
            let (min, max) = (sel.min(), sel.max());
            if min < max {
                self.buffer.remove_range(min, max);
                self.highlighter.invalidate(min);
                deleted += max - min;
            }
            self.buffer.insert(min, b'\n');
            inserted += 1;
            let mut position = min + 1;
            if self.config.auto_indent {
                // The line we just ended runs up to the inserted newline;
                // copy its leading run of spaces and tabs.
                let line = self.buffer.line_of(position);
                let prev_start = self.buffer.line_start(line - 1);
                let prev_end = self.buffer.line_end(line - 1);
                let indent: Vec<u8> = self
                    .buffer
                    .bytes_in(prev_start, prev_end)
                    .into_iter()
                    .take_while(|b| *b == b' ' || *b == b'\t')
                    .collect();
                if !indent.is_empty() {
                    self.buffer.insert_slice(position, &indent);
                    inserted += indent.len();
                    position += indent.len();
                }
            }
            self.highlighter.invalidate(min);
            *self.selections.get_mut(i) = Selection::cursor(position);
        }
        self.selections.collapse(false);
    }

    /// Delete the selection, or the previous codepoint at a bare cursor.
    pub fn delete_backward(&mut self) {
        let mut deleted = 0usize;
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            sel.shift_back(deleted);
            if sel.is_cursor() {
                sel.head = self.buffer.prev_index(sel.head);
            }
            let (min, max) = (sel.min(), sel.max());
            if min < max {
                self.buffer.remove_range(min, max);
                self.highlighter.invalidate(min);
                deleted += max - min;
            }
            *self.selections.get_mut(i) = Selection::cursor(min);
        }
        self.selections.collapse(true);
    }

    /// Delete the selection, or the next codepoint at a bare cursor.
    pub fn delete_forward(&mut self) {
        let mut deleted = 0usize;
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            sel.shift_back(deleted);
            if sel.is_cursor() {
                sel.head = self.buffer.next_index(sel.head);
            }
            let (min, max) = (sel.min(), sel.max());
            if min < max {
                self.buffer.remove_range(min, max);
                self.highlighter.invalidate(min);
                deleted += max - min;
            }
            *self.selections.get_mut(i) = Selection::cursor(min);
        }
        self.selections.collapse(false);
    }

    // --- selection commands ---

    /// Replace all selections with a bare cursor at the clicked position.
    pub fn set_cursor(&mut self, column: usize, line: usize) {
        let index = self.buffer.index_at(column, line);
        self.selections.set_single(Selection::cursor(index));
    }

    /// Remove the selection under the clicked position, or add a new bare
    /// cursor there.
    pub fn toggle_cursor(&mut self, column: usize, line: usize) {
        let index = self.buffer.index_at(column, line);
        match self.selections.find_containing(index) {
            Some(i) => {
                self.selections.remove(i);
            }
            None => {
                self.selections.insert_sorted(Selection::cursor(index));
            }
        }
    }

    /// Move only the last-active selection's head to the clicked position.
    pub fn extend_selection(&mut self, column: usize, line: usize) {
        let index = self.buffer.index_at(column, line);
        let sel = self.selections.last_active_mut();
        sel.head = index;
        let reversed = sel.is_reversed();
        self.selections.collapse(reversed);
    }

    /// Single selection spanning the document, excluding the synthesised
    /// trailing newline.
    pub fn select_all(&mut self) {
        let end = self.buffer.size() - 1;
        self.selections.set_single(Selection::new(0, end));
    }

    pub fn move_left(&mut self, extend: bool) {
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            if !extend && !sel.is_cursor() {
                sel.collapse_to(sel.min());
            } else {
                sel.head = self.buffer.prev_index(sel.head);
                if !extend {
                    sel.tail = sel.head;
                }
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(true);
    }

    pub fn move_right(&mut self, extend: bool) {
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            if !extend && !sel.is_cursor() {
                sel.collapse_to(sel.max());
            } else {
                sel.head = self.buffer.next_index(sel.head);
                if !extend {
                    sel.tail = sel.head;
                }
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(false);
    }

    pub fn move_up(&mut self, extend: bool) {
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            if !extend && !sel.is_cursor() {
                sel.collapse_to(sel.min());
            } else {
                sel.head = self.vertical_target(sel.head, true);
                if !extend {
                    sel.tail = sel.head;
                }
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(true);
    }

    pub fn move_down(&mut self, extend: bool) {
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            if !extend && !sel.is_cursor() {
                sel.collapse_to(sel.max());
            } else {
                sel.head = self.vertical_target(sel.head, false);
                if !extend {
                    sel.tail = sel.head;
                }
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(false);
    }

    pub fn move_to_beginning_of_line(&mut self, extend: bool) {
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            sel.head = self.buffer.line_start(self.buffer.line_of(sel.head));
            if !extend {
                sel.tail = sel.head;
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(true);
    }

    pub fn move_to_end_of_line(&mut self, extend: bool) {
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            sel.head = self.buffer.line_end(self.buffer.line_of(sel.head));
            if !extend {
                sel.tail = sel.head;
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(false);
    }

    /// Word motion is defined by the language; without one it is a no-op.
    pub fn move_to_beginning_of_word(&mut self, extend: bool) {
        let language = self.highlighter.language();
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            if let Some(language) = language {
                sel.head = language.prev_word(sel.head);
            }
            if !extend {
                sel.tail = sel.head;
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(true);
    }

    pub fn move_to_end_of_word(&mut self, extend: bool) {
        let language = self.highlighter.language();
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            if let Some(language) = language {
                sel.head = language.next_word(sel.head);
            }
            if !extend {
                sel.tail = sel.head;
            }
            *self.selections.get_mut(i) = sel;
        }
        self.selections.collapse(false);
    }

    // --- clipboard commands ---

    /// Selected ranges, concatenated with newline separators.
    pub fn copy(&self) -> String {
        let mut out: Vec<u8> = Vec::new();
        for (k, sel) in self.selections.iter().enumerate() {
            if k > 0 {
                out.push(b'\n');
            }
            out.extend(self.buffer.bytes_in(sel.min(), sel.max()));
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Copy, then delete the selections.
    pub fn cut(&mut self) -> String {
        let text = self.copy();
        self.replace_at_selections(&[b"".as_slice()], false);
        text
    }

    /// Insert pasted text. When the text carries exactly one fragment per
    /// selection (count - 1 newlines), the fragments distribute across the
    /// selections in order; otherwise every selection receives the whole
    /// text.
    pub fn paste(&mut self, text: &str) {
        let newline_count = text.bytes().filter(|b| *b == b'\n').count();
        if newline_count == self.selections.len() - 1 {
            let fragments: Vec<&[u8]> = text.split('\n').map(|s| s.as_bytes()).collect();
            self.replace_at_selections(&fragments, false);
        } else {
            self.replace_at_selections(&[text.as_bytes()], false);
        }
    }

    // --- rendering ---

    /// Render records for the half-open row range `[first, last)`.
    pub fn render(&mut self, first: usize, last: usize) -> Vec<LineRecord> {
        let spans = self
            .highlighter
            .spans(&self.buffer, self.config.highlight_threshold)
            .to_vec();
        let total = self.buffer.total_lines();
        let mut records = Vec::with_capacity(last.saturating_sub(first));
        for i in first..last {
            if i >= total {
                records.push(LineRecord::virtual_row(i + 1));
                continue;
            }
            let start = self.buffer.line_start(i);
            let end = self.buffer.line_end(i) + 1;
            let bytes = self.buffer.bytes_in(start, end);
            let length = bytes.len();

            let mut line_spans = Vec::new();
            for span in &spans {
                let s = span.start.max(start);
                let e = span.end.min(start + length);
                if s < e {
                    let style = span.style.theme_index().unwrap_or(0);
                    line_spans.push((s - start, e - start, style));
                }
            }

            let mut line_selections = Vec::new();
            let mut line_cursors = Vec::new();
            for sel in self.selections.iter() {
                if !sel.is_cursor() {
                    let s = sel.min().max(start);
                    let e = sel.max().min(end);
                    if s < e {
                        line_selections.push((s - start, e - start));
                    }
                }
                if sel.head >= start && sel.head < end {
                    line_cursors.push(sel.head - start);
                }
            }

            records.push(LineRecord {
                text: String::from_utf8_lossy(&bytes).into_owned(),
                number: i + 1,
                spans: line_spans,
                selections: line_selections,
                cursors: line_cursors,
            });
        }
        records
    }

    /// The render records as the host's JSON array.
    pub fn render_json(&mut self, first: usize, last: usize) -> String {
        serde_json::to_string(&self.render(first, last)).expect("line records serialize")
    }

    /// The active theme as its JSON descriptor.
    pub fn theme_json(&self) -> String {
        serde_json::to_string(&self.theme).expect("theme serializes")
    }

    // --- internals ---

    /// The batch edit protocol: walk selections in order, rebase each by the
    /// edits performed so far, delete its range, insert its fragment, leave a
    /// bare cursor after the insertion, and collapse once at the end.
    fn replace_at_selections(&mut self, fragments: &[&[u8]], reverse_direction: bool) {
        debug_assert!(fragments.len() == 1 || fragments.len() == self.selections.len());
        let mut inserted = 0usize;
        let mut deleted = 0usize;
        for i in 0..self.selections.len() {
            let mut sel = self.selections.get(i);
            sel.shift_forward(inserted);
            sel.shift_back(deleted);
            let (min, max) = (sel.min(), sel.max());
            if min < max {
                self.buffer.remove_range(min, max);
                self.highlighter.invalidate(min);
                deleted += max - min;
            }
            let fragment = if fragments.len() == 1 {
                fragments[0]
            } else {
                fragments[i]
            };
            if !fragment.is_empty() {
                self.buffer.insert_slice(min, fragment);
                self.highlighter.invalidate(min);
                inserted += fragment.len();
            }
            *self.selections.get_mut(i) = Selection::cursor(min + fragment.len());
        }
        self.selections.collapse(reverse_direction);
    }

    /// Target byte offset for vertical motion, preserving the codepoint
    /// column. Clamped to the buffer edges on the first and last line.
    fn vertical_target(&self, head: usize, up: bool) -> usize {
        let line = self.buffer.line_of(head);
        if up && line == 0 {
            return 0;
        }
        if !up && line + 1 >= self.buffer.total_lines() {
            return self.buffer.size() - 1;
        }
        let target = if up { line - 1 } else { line + 1 };
        let column = self.buffer.codepoints_before(head)
            - self.buffer.codepoints_before(self.buffer.line_start(line));
        let target_start = self.buffer.line_start(target);
        let codepoint = (self.buffer.codepoints_before(target_start) + column)
            .min(self.buffer.codepoints_before(self.buffer.line_end(target)));
        self.buffer.byte_of_codepoint(codepoint)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
