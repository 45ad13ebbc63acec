// EditorTestHarness - drives the editor the way a host would.

use vellum::{Config, Editor};

pub struct EditorTestHarness {
    editor: Editor,
}

#[allow(dead_code)]
impl EditorTestHarness {
    pub fn new() -> Self {
        EditorTestHarness {
            editor: Editor::new(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        EditorTestHarness {
            editor: Editor::with_config(config),
        }
    }

    /// Start from initial buffer content, cursor at the origin.
    pub fn with_text(text: &str) -> Self {
        EditorTestHarness {
            editor: Editor::from_bytes(text.as_bytes()),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// The whole document, including the synthesised trailing newline.
    pub fn buffer_content(&self) -> String {
        String::from_utf8_lossy(&self.editor.buffer().to_bytes()).into_owned()
    }

    pub fn assert_buffer_content(&self, expected: &str) {
        assert_eq!(self.buffer_content(), expected);
    }

    /// Caret byte offsets, in selection order.
    pub fn cursor_positions(&self) -> Vec<usize> {
        self.editor.selections().iter().map(|s| s.head).collect()
    }

    /// (tail, head) pairs, in selection order.
    pub fn selection_ranges(&self) -> Vec<(usize, usize)> {
        self.editor
            .selections()
            .iter()
            .map(|s| (s.tail, s.head))
            .collect()
    }

    /// Place a bare cursor, then add more at the given (column, line) spots.
    pub fn set_cursors(&mut self, positions: &[(usize, usize)]) {
        let (column, line) = positions[0];
        self.editor.set_cursor(column, line);
        for (column, line) in &positions[1..] {
            self.editor.toggle_cursor(*column, *line);
        }
    }

    /// Every selection is in bounds, sorted, and non-overlapping.
    pub fn assert_selection_invariants(&self) {
        let size = self.editor.buffer().size();
        let selections: Vec<_> = self.editor.selections().iter().copied().collect();
        assert!(!selections.is_empty(), "selections must never be empty");
        for sel in &selections {
            assert!(sel.tail <= size - 1, "tail {} out of bounds", sel.tail);
            assert!(sel.head <= size - 1, "head {} out of bounds", sel.head);
        }
        for pair in selections.windows(2) {
            assert!(
                pair[0].min() <= pair[1].min(),
                "selections out of order: {:?}",
                selections
            );
            assert!(
                pair[0].max() <= pair[1].min(),
                "selections overlap: {:?}",
                selections
            );
        }
    }
}
