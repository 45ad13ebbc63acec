//! Per-line render records.
//!
//! One record per requested row, with everything the host needs to draw it:
//! the raw line text, its 1-based number, styled spans, selected ranges, and
//! caret positions. All offsets are byte offsets local to the line.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    /// Line content including its trailing newline; empty for virtual rows
    /// past the end of the document.
    pub text: String,
    /// 1-based line number.
    pub number: usize,
    /// `[start, end, style]` triples; `style` indexes the theme's `styles`.
    pub spans: Vec<(usize, usize, usize)>,
    /// `[start, end)` selected ranges on this line.
    pub selections: Vec<(usize, usize)>,
    /// Caret positions on this line.
    pub cursors: Vec<usize>,
}

impl LineRecord {
    /// A virtual row below the last line of the document.
    pub fn virtual_row(number: usize) -> Self {
        LineRecord {
            text: String::new(),
            number,
            spans: Vec::new(),
            selections: Vec::new(),
            cursors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let record = LineRecord {
            text: "fn x\n".to_string(),
            number: 3,
            spans: vec![(0, 2, 2)],
            selections: vec![(1, 4)],
            cursors: vec![2],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"text":"fn x\n","number":3,"spans":[[0,2,2]],"selections":[[1,4]],"cursors":[2]}"#
        );
    }

    #[test]
    fn test_virtual_row_is_empty() {
        let record = LineRecord::virtual_row(7);
        assert_eq!(record.number, 7);
        assert!(record.text.is_empty());
        assert!(record.spans.is_empty() && record.selections.is_empty() && record.cursors.is_empty());
    }
}
