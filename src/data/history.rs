use super::model::Mask;

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 100;

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor now points at this snapshot.
    Moved(usize),
    /// Already at the requested end, or not enough history to move.
    Unchanged,
}

// ---------------------------------------------------------------------------
// EditHistory – bounded linear undo/redo over mask snapshots
// ---------------------------------------------------------------------------

/// Linear undo/redo stack.  The current mask is `snapshots[cursor]`.
///
/// A push from the middle of the stack drops the redo branch.  When the
/// stack grows past `capacity` the oldest snapshots are evicted.
#[derive(Debug, Clone)]
pub struct EditHistory {
    snapshots: Vec<Mask>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl EditHistory {
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        EditHistory {
            snapshots: Vec::new(),
            cursor: None,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Mask> {
        self.cursor.and_then(|c| self.snapshots.get(c))
    }

    /// Record `mask` as the new current state.
    pub fn push(&mut self, mask: Mask) {
        let position = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(position);
        self.snapshots.push(mask);

        let overflow = self.snapshots.len().saturating_sub(self.capacity);
        if overflow > 0 {
            self.snapshots.drain(..overflow);
            log::debug!("history full, evicted {overflow} oldest snapshot(s)");
        }
        self.cursor = Some(position.saturating_sub(overflow));
    }

    pub fn undo(&mut self) -> Step {
        match self.cursor {
            Some(c) if self.snapshots.len() > 1 && c > 0 => self.move_to(c - 1),
            _ => Step::Unchanged,
        }
    }

    pub fn redo(&mut self) -> Step {
        match self.cursor {
            Some(c) if self.snapshots.len() > 1 && c + 1 < self.snapshots.len() => {
                self.move_to(c + 1)
            }
            _ => Step::Unchanged,
        }
    }

    pub fn first(&mut self) -> Step {
        match self.cursor {
            Some(c) if self.snapshots.len() > 1 && c != 0 => self.move_to(0),
            _ => Step::Unchanged,
        }
    }

    pub fn last(&mut self) -> Step {
        let end = self.snapshots.len().saturating_sub(1);
        match self.cursor {
            Some(c) if self.snapshots.len() > 1 && c != end => self.move_to(end),
            _ => Step::Unchanged,
        }
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }

    fn move_to(&mut self, index: usize) -> Step {
        self.cursor = Some(index);
        Step::Moved(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(tag: usize) -> Mask {
        Mask::from_bools((0..256).map(|i| i == tag).collect())
    }

    #[test]
    fn empty_history_has_no_current_and_ignores_navigation() {
        let mut h = EditHistory::default();
        assert!(h.current().is_none());
        assert_eq!(h.undo(), Step::Unchanged);
        assert_eq!(h.redo(), Step::Unchanged);
        assert_eq!(h.first(), Step::Unchanged);
        assert_eq!(h.last(), Step::Unchanged);
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn single_snapshot_cannot_move() {
        let mut h = EditHistory::default();
        h.push(m(1));
        assert_eq!(h.undo(), Step::Unchanged);
        assert_eq!(h.redo(), Step::Unchanged);
        assert_eq!(h.current(), Some(&m(1)));
    }

    #[test]
    fn undo_then_redo_restores_states() {
        let mut h = EditHistory::default();
        h.push(m(1));
        h.push(m(2));
        assert_eq!(h.undo(), Step::Moved(0));
        assert_eq!(h.current(), Some(&m(1)));
        assert_eq!(h.undo(), Step::Unchanged);
        assert_eq!(h.redo(), Step::Moved(1));
        assert_eq!(h.current(), Some(&m(2)));
        assert_eq!(h.redo(), Step::Unchanged);
    }

    #[test]
    fn push_after_undo_drops_redo_branch() {
        let mut h = EditHistory::default();
        for tag in 1..=4 {
            h.push(m(tag));
        }
        h.undo();
        h.undo();
        h.push(m(9));
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), Some(2));
        assert_eq!(h.redo(), Step::Unchanged);
        assert_eq!(h.undo(), Step::Moved(1));
        assert_eq!(h.current(), Some(&m(2)));
    }

    #[test]
    fn first_and_last_jump_to_ends() {
        let mut h = EditHistory::default();
        for tag in 1..=5 {
            h.push(m(tag));
        }
        assert_eq!(h.first(), Step::Moved(0));
        assert_eq!(h.current(), Some(&m(1)));
        assert_eq!(h.first(), Step::Unchanged);
        assert_eq!(h.last(), Step::Moved(4));
        assert_eq!(h.current(), Some(&m(5)));
        assert_eq!(h.last(), Step::Unchanged);
    }

    #[test]
    fn capacity_evicts_oldest_and_keeps_latest_current() {
        let capacity = 10;
        let mut h = EditHistory::with_capacity(capacity);
        for tag in 0..capacity + 7 {
            h.push(m(tag));
        }
        assert_eq!(h.len(), capacity);
        assert_eq!(h.cursor(), Some(capacity - 1));
        assert_eq!(h.current(), Some(&m(capacity + 6)));
        h.first();
        assert_eq!(h.current(), Some(&m(7)));
    }

    #[test]
    fn default_capacity_is_one_hundred() {
        let mut h = EditHistory::default();
        for tag in 0..130 {
            h.push(m(tag));
        }
        assert_eq!(h.len(), DEFAULT_CAPACITY);
        assert_eq!(h.current(), Some(&m(129)));
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut h = EditHistory::with_capacity(0);
        assert_eq!(h.capacity(), 1);
        h.push(m(1));
        h.push(m(2));
        assert_eq!(h.len(), 1);
        assert_eq!(h.current(), Some(&m(2)));
        h.clear();
        assert!(h.is_empty());
        assert!(h.current().is_none());
        h.push(m(3));
        assert_eq!(h.cursor(), Some(0));
    }
}
