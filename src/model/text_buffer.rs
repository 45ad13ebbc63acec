//! The document model: a counted tree of bytes with positional queries.
//!
//! The buffer stores raw bytes and treats them as UTF-8 without ever
//! rejecting input; a codepoint is counted at every non-continuation byte.
//! The last byte is always a newline: one is synthesised at construction and
//! after loading a file that does not end in one, so `size >= 1` and every
//! line (including the last) owns its terminating `\n`.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use super::tree::{Tree, TreeComp, TreeInfo};

/// Aggregate counters cached at every tree node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextInfo {
    pub bytes: usize,
    pub codepoints: usize,
    pub newlines: usize,
}

impl TreeInfo for TextInfo {
    type Elem = u8;

    fn of(byte: u8) -> Self {
        TextInfo {
            bytes: 1,
            // A codepoint starts at every byte whose top two bits are not 10.
            codepoints: (byte & 0xC0 != 0x80) as usize,
            newlines: (byte == b'\n') as usize,
        }
    }

    fn plus(self, other: Self) -> Self {
        TextInfo {
            bytes: self.bytes + other.bytes,
            codepoints: self.codepoints + other.codepoints,
            newlines: self.newlines + other.newlines,
        }
    }
}

/// Position by byte offset.
#[derive(Debug, Clone, Copy)]
pub struct ByteComp(pub usize);

impl TreeComp<TextInfo> for ByteComp {
    fn less_than(&self, sum: &TextInfo) -> bool {
        self.0 < sum.bytes
    }
}

/// Position by codepoint index.
#[derive(Debug, Clone, Copy)]
pub struct CodepointComp(pub usize);

impl TreeComp<TextInfo> for CodepointComp {
    fn less_than(&self, sum: &TextInfo) -> bool {
        self.0 < sum.codepoints
    }
}

/// Position by newline count.
#[derive(Debug, Clone, Copy)]
pub struct LineComp(pub usize);

impl TreeComp<TextInfo> for LineComp {
    fn less_than(&self, sum: &TextInfo) -> bool {
        self.0 < sum.newlines
    }
}

pub struct TextBuffer {
    tree: Tree<TextInfo>,
}

impl TextBuffer {
    /// An empty document: exactly one newline.
    pub fn new() -> Self {
        let mut tree = Tree::new();
        tree.append(b'\n');
        TextBuffer { tree }
    }

    /// Build from raw bytes, synthesising the trailing newline if missing.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let needs_newline = bytes.last() != Some(&b'\n');
        let mut tree = Tree::from_elems(bytes.iter().copied());
        if needs_newline || bytes.is_empty() {
            tree.append(b'\n');
        }
        TextBuffer { tree }
    }

    /// Read a whole file. I/O failure leaves no partial state behind.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        tracing::info!("loaded {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::from_bytes(&bytes))
    }

    /// Stream the document into a sibling temp file, then rename it over the
    /// destination.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let temp_path = path.with_extension("tmp");
        {
            let file = fs::File::create(&temp_path)
                .with_context(|| format!("failed to create {}", temp_path.display()))?;
            let mut writer = BufWriter::new(file);
            for byte in self.tree.iter() {
                writer.write_all(&[byte])?;
            }
            writer.flush()?;
        }
        fs::rename(&temp_path, path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        tracing::info!("saved {} ({} bytes)", path.display(), self.size());
        Ok(())
    }

    pub fn info(&self) -> TextInfo {
        self.tree.info()
    }

    /// Total byte count, including the synthesised trailing newline.
    pub fn size(&self) -> usize {
        self.tree.info().bytes
    }

    /// Number of lines, i.e. number of newlines.
    pub fn total_lines(&self) -> usize {
        self.tree.info().newlines
    }

    /// Byte offset where line `k` starts.
    pub fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            0
        } else {
            self.tree.sum(&LineComp(line - 1)).bytes + 1
        }
    }

    /// Byte offset of line `k`'s terminating newline.
    pub fn line_end(&self, line: usize) -> usize {
        self.tree.sum(&LineComp(line)).bytes
    }

    /// Line containing byte offset `i`.
    pub fn line_of(&self, index: usize) -> usize {
        self.tree.sum(&ByteComp(index)).newlines
    }

    /// Codepoints strictly before byte offset `i`.
    pub fn codepoints_before(&self, index: usize) -> usize {
        self.tree.sum(&ByteComp(index)).codepoints
    }

    /// Byte offset of codepoint number `c` (the full size when past the end).
    pub fn byte_of_codepoint(&self, codepoint: usize) -> usize {
        self.tree.sum(&CodepointComp(codepoint)).bytes
    }

    /// Start of the previous codepoint, clamped at 0.
    pub fn prev_index(&self, index: usize) -> usize {
        let cp = self.codepoints_before(index);
        if cp == 0 {
            0
        } else {
            self.byte_of_codepoint(cp - 1)
        }
    }

    /// Start of the next codepoint, clamped at `size - 1`.
    pub fn next_index(&self, index: usize) -> usize {
        let cp = self.codepoints_before(index);
        self.byte_of_codepoint(cp + 1).min(self.size() - 1)
    }

    /// Map a click position (byte column, line) to a byte offset. Rows past
    /// the last line land on the final newline; columns past the line end
    /// clamp to the line's newline.
    pub fn index_at(&self, column: usize, line: usize) -> usize {
        if line + 1 > self.total_lines() {
            return self.size() - 1;
        }
        (self.line_start(line) + column).min(self.line_end(line))
    }

    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.tree.get(&ByteComp(index))
    }

    /// Insert a single byte at `index`. Multi-byte codepoints are inserted
    /// byte by byte, in order.
    pub fn insert(&mut self, index: usize, byte: u8) {
        self.tree.insert(&ByteComp(index), byte);
    }

    /// Insert a run of bytes starting at `index`.
    pub fn insert_slice(&mut self, index: usize, bytes: &[u8]) {
        for (k, byte) in bytes.iter().enumerate() {
            self.insert(index + k, *byte);
        }
    }

    /// Remove the byte at `index`.
    pub fn remove(&mut self, index: usize) {
        self.tree.remove(&ByteComp(index));
    }

    /// Remove the byte range `[start, end)`.
    pub fn remove_range(&mut self, start: usize, end: usize) {
        for _ in start..end {
            self.remove(start);
        }
    }

    /// Copy out the byte range `[start, end)`.
    pub fn bytes_in(&self, start: usize, end: usize) -> Vec<u8> {
        self.tree
            .iter_from(&ByteComp(start))
            .take(end.saturating_sub(start))
            .collect()
    }

    /// Iterate all bytes in order.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.tree.iter()
    }

    /// The whole document as one allocation (tests, parser snapshots).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.tree.iter().collect()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
