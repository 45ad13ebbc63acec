//! Directed selections and the ordered multi-selection collection.

/// A directed range of bytes. `head` is the caret, `tail` the anchor; equal
/// endpoints make a bare cursor. The selected text is `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub tail: usize,
    pub head: usize,
}

impl Selection {
    /// A bare cursor.
    pub fn cursor(position: usize) -> Self {
        Selection {
            tail: position,
            head: position,
        }
    }

    pub fn new(tail: usize, head: usize) -> Self {
        Selection { tail, head }
    }

    pub fn is_cursor(&self) -> bool {
        self.tail == self.head
    }

    pub fn is_reversed(&self) -> bool {
        self.tail > self.head
    }

    pub fn min(&self) -> usize {
        self.tail.min(self.head)
    }

    pub fn max(&self) -> usize {
        self.tail.max(self.head)
    }

    pub fn len(&self) -> usize {
        self.max() - self.min()
    }

    /// Translate both endpoints forward by `n` bytes.
    pub fn shift_forward(&mut self, n: usize) {
        self.tail += n;
        self.head += n;
    }

    /// Translate both endpoints back by `n` bytes.
    pub fn shift_back(&mut self, n: usize) {
        self.tail -= n;
        self.head -= n;
    }

    /// Collapse to a bare cursor at `position`.
    pub fn collapse_to(&mut self, position: usize) {
        self.tail = position;
        self.head = position;
    }

    /// Whether a point is inside the selected range. A bare cursor contains
    /// exactly its own position.
    pub fn contains(&self, position: usize) -> bool {
        if self.is_cursor() {
            position == self.head
        } else {
            self.min() <= position && position < self.max()
        }
    }
}

/// Ordered, non-overlapping selections. Never empty: the initial state is a
/// single bare cursor at offset 0.
///
/// The last-active index tracks the selection most recently created or
/// modified; it survives collapse whenever the selection it points at does.
#[derive(Debug, Clone)]
pub struct Selections {
    items: Vec<Selection>,
    last_active: usize,
}

impl Selections {
    pub fn new() -> Self {
        Selections {
            items: vec![Selection::cursor(0)],
            last_active: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Selection {
        self.items[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Selection {
        &mut self.items[index]
    }

    pub fn last_active_index(&self) -> usize {
        self.last_active
    }

    pub fn last_active(&self) -> Selection {
        self.items[self.last_active]
    }

    pub fn last_active_mut(&mut self) -> &mut Selection {
        &mut self.items[self.last_active]
    }

    /// Replace everything with a single selection.
    pub fn set_single(&mut self, selection: Selection) {
        self.items.clear();
        self.items.push(selection);
        self.last_active = 0;
    }

    /// Insert a new selection at its sorted position and make it last-active.
    pub fn insert_sorted(&mut self, selection: Selection) {
        let index = self
            .items
            .partition_point(|s| s.min() <= selection.min());
        self.items.insert(index, selection);
        self.last_active = index;
    }

    /// Index of the selection containing `position`, if any.
    pub fn find_containing(&self, position: usize) -> Option<usize> {
        self.items.iter().position(|s| s.contains(position))
    }

    /// Remove the selection at `index`. Refuses to empty the collection.
    /// Returns whether a removal happened.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.items.len() == 1 {
            return false;
        }
        self.items.remove(index);
        if self.last_active == index {
            self.last_active = self.items.len() - 1;
        } else if self.last_active > index {
            self.last_active -= 1;
        }
        true
    }

    /// Merge overlapping and touching neighbours (and duplicate carets).
    ///
    /// The merged head follows the direction of the most recent movement:
    /// with `reverse_direction` the caret lands on the low end, otherwise on
    /// the high end. Idempotent.
    pub fn collapse(&mut self, reverse_direction: bool) {
        // Per-selection movement can reorder the set (a caret stepping onto
        // the line of an earlier selection); restore min-order first,
        // keeping last-active pinned to the same selection.
        if !self.items.windows(2).all(|w| w[0].min() <= w[1].min()) {
            let active = self.items[self.last_active];
            self.items.sort_by_key(|s| s.min());
            self.last_active = self
                .items
                .iter()
                .position(|s| *s == active)
                .unwrap_or(self.items.len() - 1);
        }
        let mut i = 0;
        while i + 1 < self.items.len() {
            let a = self.items[i];
            let b = self.items[i + 1];
            if a.max() >= b.min() || a.head == b.head {
                let low = a.min();
                let high = a.max().max(b.max());
                self.items[i] = if reverse_direction {
                    Selection::new(high, low)
                } else {
                    Selection::new(low, high)
                };
                self.items.remove(i + 1);
                if self.last_active >= i + 1 {
                    self.last_active -= 1;
                }
            } else {
                i += 1;
            }
        }
        debug_assert!(self.check_invariants());
    }

    /// Sorted, pairwise disjoint, non-empty.
    fn check_invariants(&self) -> bool {
        !self.items.is_empty()
            && self.last_active < self.items.len()
            && self.items.windows(2).all(|w| w[0].max() < w[1].min())
    }
}

impl Default for Selections {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_and_range() {
        let s = Selection::new(5, 2);
        assert!(s.is_reversed());
        assert_eq!(s.min(), 2);
        assert_eq!(s.max(), 5);
        assert_eq!(s.len(), 3);
        assert!(s.contains(2));
        assert!(s.contains(4));
        assert!(!s.contains(5));
    }

    #[test]
    fn test_bare_cursor_contains_itself() {
        let s = Selection::cursor(3);
        assert!(s.is_cursor());
        assert!(s.contains(3));
        assert!(!s.contains(2));
        assert!(!s.contains(4));
    }

    #[test]
    fn test_shift_arithmetic() {
        let mut s = Selection::new(2, 4);
        s.shift_forward(3);
        assert_eq!(s, Selection::new(5, 7));
        s.shift_back(5);
        assert_eq!(s, Selection::new(0, 2));
    }

    #[test]
    fn test_insert_sorted_updates_last_active() {
        let mut sels = Selections::new();
        sels.set_single(Selection::cursor(10));
        sels.insert_sorted(Selection::cursor(2));
        assert_eq!(sels.last_active_index(), 0);
        assert_eq!(sels.get(0).head, 2);
        sels.insert_sorted(Selection::cursor(20));
        assert_eq!(sels.last_active_index(), 2);
        assert_eq!(
            sels.iter().map(|s| s.head).collect::<Vec<_>>(),
            vec![2, 10, 20]
        );
    }

    #[test]
    fn test_remove_keeps_nonempty() {
        let mut sels = Selections::new();
        assert!(!sels.remove(0));
        sels.insert_sorted(Selection::cursor(5));
        assert!(sels.remove(0));
        assert_eq!(sels.len(), 1);
        assert_eq!(sels.last_active_index(), 0);
    }

    #[test]
    fn test_collapse_merges_overlap_forward() {
        let mut sels = Selections::new();
        sels.set_single(Selection::new(0, 4));
        sels.insert_sorted(Selection::new(3, 8));
        sels.collapse(false);
        assert_eq!(sels.len(), 1);
        assert_eq!(sels.get(0), Selection::new(0, 8));
    }

    #[test]
    fn test_collapse_merges_touching_reversed() {
        let mut sels = Selections::new();
        sels.set_single(Selection::new(0, 4));
        sels.insert_sorted(Selection::new(4, 8));
        sels.collapse(true);
        assert_eq!(sels.len(), 1);
        // Reversed merge: caret on the low end.
        assert_eq!(sels.get(0), Selection::new(8, 0));
    }

    #[test]
    fn test_collapse_merges_duplicate_carets() {
        let mut sels = Selections::new();
        sels.set_single(Selection::cursor(3));
        sels.insert_sorted(Selection::cursor(3));
        sels.collapse(false);
        assert_eq!(sels.len(), 1);
        assert_eq!(sels.get(0), Selection::cursor(3));
    }

    #[test]
    fn test_collapse_leaves_disjoint_alone() {
        let mut sels = Selections::new();
        sels.set_single(Selection::new(0, 2));
        sels.insert_sorted(Selection::new(4, 6));
        sels.collapse(false);
        assert_eq!(sels.len(), 2);
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let mut sels = Selections::new();
        sels.set_single(Selection::new(0, 3));
        sels.insert_sorted(Selection::new(2, 5));
        sels.insert_sorted(Selection::new(7, 9));
        sels.collapse(false);
        let once: Vec<_> = sels.iter().copied().collect();
        sels.collapse(false);
        let twice: Vec<_> = sels.iter().copied().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_collapse_tracks_last_active_through_merge() {
        let mut sels = Selections::new();
        sels.set_single(Selection::new(0, 3));
        sels.insert_sorted(Selection::new(2, 5));
        // Last-active is index 1, which merges into index 0.
        assert_eq!(sels.last_active_index(), 1);
        sels.collapse(false);
        assert_eq!(sels.last_active_index(), 0);
    }

    #[test]
    fn test_collapse_chain_of_three() {
        let mut sels = Selections::new();
        sels.set_single(Selection::new(0, 3));
        sels.insert_sorted(Selection::new(3, 6));
        sels.insert_sorted(Selection::new(6, 9));
        sels.collapse(false);
        assert_eq!(sels.len(), 1);
        assert_eq!(sels.get(0), Selection::new(0, 9));
    }
}
