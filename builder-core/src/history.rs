//! Linear undo/redo history of collection snapshots.

use std::collections::VecDeque;

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::store::Snapshot;

/// Undo/redo stack with a cursor.
///
/// The entry under the cursor is the current state. Pushing discards every
/// entry after the cursor, so there is never a branch to redo into. Once
/// `limit` entries are held the oldest ones are dropped.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl History {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Start a history holding at most `limit` entries (at least one).
    #[must_use]
    pub fn with_limit(initial: Snapshot, limit: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new current state.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
        tracing::trace!(cursor = self.cursor, len = self.entries.len(), "History push");
    }

    /// Step back, returning the state to restore.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Step forward, returning the state to restore.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Whether [`History::undo`] would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`History::redo`] would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// The entry under the cursor.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    /// Index of the current entry.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least its current entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Forget everything and start over from `initial`.
    pub fn reset(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementType};

    fn snapshot_of(n: usize) -> Snapshot {
        Snapshot::new(
            (0..n)
                .map(|i| Element::new(ElementType::Text).with_content(i.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_starts_at_cursor_zero() {
        let history = History::new(snapshot_of(0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_at_start_and_redo_at_tail_are_noops() {
        let mut history = History::new(snapshot_of(0));
        assert!(history.undo().is_none());
        history.push(snapshot_of(1));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_undo_then_redo_returns_same_snapshot() {
        let first = snapshot_of(1);
        let second = snapshot_of(2);
        let mut history = History::new(first.clone());
        history.push(second.clone());

        assert!(history.undo().expect("can undo").ptr_eq(&first));
        assert!(history.redo().expect("can redo").ptr_eq(&second));
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut history = History::new(snapshot_of(0));
        history.push(snapshot_of(1));
        history.push(snapshot_of(2));
        history.undo();
        history.undo();
        let branch = snapshot_of(5);
        history.push(branch.clone());
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(history.current().ptr_eq(&branch));
    }

    #[test]
    fn test_limit_drops_oldest_and_keeps_cursor_valid() {
        let mut history = History::with_limit(snapshot_of(0), 3);
        for n in 1..=5 {
            history.push(snapshot_of(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().len(), 5);

        assert_eq!(history.undo().map(|s| s.len()), Some(4));
        assert_eq!(history.undo().map(|s| s.len()), Some(3));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        let mut history = History::with_limit(snapshot_of(0), 0);
        history.push(snapshot_of(1));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(snapshot_of(0));
        history.push(snapshot_of(1));
        history.reset(snapshot_of(3));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().len(), 3);
    }
}
