//! FILENAME: core/pivot-engine/src/cursor.rs
//! Ordered cursor over the top-level rows of a pivot index.
//!
//! The cursor walks rows in insertion order and can detach the row it last
//! returned without disturbing the walk. It borrows the index mutably for its
//! whole lifetime, so no other mutation can interleave with it.

use crate::error::PivotError;
use crate::group::KeyMap;

/// A lending cursor with `has_next` / `next` / `current_key` / `remove`.
///
/// `remove` is valid once per element, and only after `next` returned it.
pub struct RowCursor<'a, T> {
    rows: &'a mut KeyMap<T>,
    /// Position of the element the next call to `next` returns.
    next: usize,
    /// Position of the element last returned by `next`, cleared by `remove`.
    current: Option<usize>,
}

impl<'a, T> RowCursor<'a, T> {
    pub(crate) fn new(rows: &'a mut KeyMap<T>) -> Self {
        RowCursor {
            rows,
            next: 0,
            current: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next < self.rows.len()
    }

    /// Advances to the next row and returns it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&mut T> {
        let idx = self.next;
        if idx >= self.rows.len() {
            self.current = None;
            return None;
        }
        self.current = Some(idx);
        self.next = idx + 1;
        self.rows.get_index_mut(idx).map(|(_, row)| row)
    }

    /// Key of the row last returned by `next`, if it is still present.
    pub fn current_key(&self) -> Option<&str> {
        self.current
            .and_then(|idx| self.rows.get_index(idx))
            .map(|(key, _)| key.as_str())
    }

    /// The row last returned by `next`, if it is still present.
    pub fn current(&self) -> Option<&T> {
        self.current
            .and_then(|idx| self.rows.get_index(idx))
            .map(|(_, row)| row)
    }

    /// Detaches the row last returned by `next` from the index and hands it
    /// back. Iteration continues with the row that followed it.
    pub fn remove(&mut self) -> Result<T, PivotError> {
        let idx = self.current.take().ok_or(PivotError::IllegalIteratorState)?;
        let (key, row) = self
            .rows
            .shift_remove_index(idx)
            .ok_or(PivotError::IllegalIteratorState)?;
        log::trace!("cursor removed row [{}]", key);
        self.next = idx;
        Ok(row)
    }
}
