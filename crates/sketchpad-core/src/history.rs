//! Undo history of raster snapshots.

use crate::raster::RasterSnapshot;

/// Ordered raster snapshots, oldest first.
///
/// The history always holds at least one entry: the state the surface was
/// mounted with.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: Vec<RasterSnapshot>,
    limit: usize,
}

impl UndoHistory {
    /// Start a history with `initial` as its floor entry.
    pub fn new(initial: RasterSnapshot, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            limit: limit.max(1),
        }
    }

    /// Append a snapshot, evicting the oldest entries beyond the limit.
    pub fn push(&mut self, snapshot: RasterSnapshot) {
        self.entries.push(snapshot);
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
    }

    /// Step back once.
    ///
    /// Removes the newest entry and returns the entry that was second to last
    /// before the removal, which the caller restores into the raster. Returns
    /// `None` at the floor.
    pub fn undo(&mut self) -> Option<RasterSnapshot> {
        if self.entries.len() <= 1 {
            return None;
        }
        let restore = self.entries[self.entries.len() - 2].clone();
        self.entries.pop();
        Some(restore)
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: RasterSnapshot) {
        self.entries.clear();
        self.entries.push(initial);
    }

    /// Number of entries, including the floor entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the history holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Newest entry.
    pub fn latest(&self) -> &RasterSnapshot {
        // The floor entry guarantees at least one element.
        &self.entries[self.entries.len() - 1]
    }
}
