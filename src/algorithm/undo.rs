//! Ordered rollback log for write-through patch edits

use crate::math::color::Rgba;
use crate::spatial::PixelGrid;

/// One overwritten cell and the color it held before the edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoEntry {
    /// Column of the cell
    pub x: usize,
    /// Row of the cell
    pub y: usize,
    /// Color before the edit
    pub original: Rgba,
}

/// Transaction log of cells modified by the current patch
///
/// Cells are recorded before they are overwritten. Committing discards the
/// log; rolling back replays it newest-first so the grid returns to exactly
/// its pre-edit state. The buffer is reused between patches and never grows
/// past the largest patch area it was sized for.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    /// Create a log able to hold `capacity` cells without reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Create a log sized for a disk of the given maximum radius
    pub fn for_radius(max_radius: u32) -> Self {
        let side = 2 * max_radius as usize + 1;
        Self::with_capacity(side * side)
    }

    /// Remember the color a cell holds before it is overwritten
    pub fn record(&mut self, x: usize, y: usize, original: Rgba) {
        self.entries.push(UndoEntry { x, y, original });
    }

    /// Keep the edits and clear the log
    pub fn commit(&mut self) {
        self.entries.clear();
    }

    /// Restore every recorded cell in reverse insertion order and clear the log
    pub fn rollback(&mut self, grid: &mut PixelGrid) {
        for entry in self.entries.drain(..).rev() {
            grid.set(entry.x, entry.y, entry.original);
        }
    }

    /// Recorded entries in insertion order
    pub fn entries(&self) -> &[UndoEntry] {
        &self.entries
    }

    /// Number of recorded cells
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded since the last commit or rollback
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cells the log can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}
