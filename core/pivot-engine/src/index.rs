//! FILENAME: core/pivot-engine/src/index.rs
//! Two-level pivot index (row -> subrow x column).
//!
//! The index keeps every subrow on the same column schema: the same column
//! keys, in the same order. Column writes are synchronized eagerly. Adding a
//! column to one (row, subrow) pair appends the real cell there and a
//! placeholder cell to every other subrow in the index, so reads can trust
//! the first subrow as representative of the whole schema.
//!
//! Cost: a single column write is O(total subrows). Reads of the schema
//! (`column_names`, `column_count`) are O(columns) and never re-validate.

use engine::{CellValue, ValueKind};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::cursor::RowCursor;
use crate::error::PivotError;
use crate::group::{Cell, Group, KeyMap, Placeholder, RowGroup, SubRowGroup};

/// Ordered set of `RowGroup`s, unique by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotIndex<V = CellValue> {
    rows: KeyMap<RowGroup<V>>,
}

impl<V> Default for PivotIndex<V> {
    fn default() -> Self {
        PivotIndex {
            rows: KeyMap::default(),
        }
    }
}

impl<V> PivotIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // ROWS
    // ========================================================================

    /// Appends `row` unless a row with the same key exists (the existing row
    /// is kept untouched). Returns whether the row was inserted.
    ///
    /// The row's pre-populated subrows and cells are taken as-is and are not
    /// checked against the current column schema.
    pub fn add_row(&mut self, row: RowGroup<V>) -> bool {
        if self.rows.contains_key(row.key()) {
            warn!("row [{}] already present, add ignored", row.key());
            return false;
        }
        debug!("add row [{}] with {} subrows", row.key(), row.len());
        self.rows.insert(row.key().to_string(), row);
        true
    }

    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = RowGroup<V>>) {
        for row in rows {
            self.add_row(row);
        }
    }

    /// Removes the row and everything below it. Missing keys are ignored.
    pub fn remove_row(&mut self, row_key: &str) -> Option<RowGroup<V>> {
        let removed = self.rows.shift_remove(row_key);
        if removed.is_some() {
            debug!("removed row [{}]", row_key);
        }
        removed
    }

    pub fn rows_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row_key: &str) -> bool {
        self.rows.contains_key(row_key)
    }

    pub fn row(&self, row_key: &str) -> Option<&RowGroup<V>> {
        self.rows.get(row_key)
    }

    /// Display names of all rows, in insertion order.
    pub fn row_names(&self) -> Vec<String> {
        self.rows.values().map(|row| row.name().to_string()).collect()
    }

    // ========================================================================
    // SUBROWS
    // ========================================================================

    pub fn sub_row_count(&self, row_key: &str) -> Result<usize, PivotError> {
        Ok(self.require_row(row_key)?.len())
    }

    /// Display names of the row's subrows, in insertion order.
    pub fn sub_row_names(&self, row_key: &str) -> Result<Vec<String>, PivotError> {
        let row = self.require_row(row_key)?;
        Ok(row.sub_rows().map(|sub_row| sub_row.name().to_string()).collect())
    }

    pub fn sub_row(&self, row_key: &str, sub_row_key: &str) -> Result<&SubRowGroup<V>, PivotError> {
        self.require_row(row_key)?
            .get(sub_row_key)
            .ok_or_else(|| PivotError::sub_row_not_found(row_key, sub_row_key))
    }

    /// Removes one subrow and its cells. A missing subrow is ignored; a
    /// missing row is an error.
    pub fn remove_sub_row(
        &mut self,
        row_key: &str,
        sub_row_key: &str,
    ) -> Result<Option<SubRowGroup<V>>, PivotError> {
        let row = self
            .rows
            .get_mut(row_key)
            .ok_or_else(|| PivotError::RowNotFound(row_key.to_string()))?;
        let removed = row.remove(sub_row_key);
        if removed.is_some() {
            debug!("removed subrow [{}] from row [{}]", sub_row_key, row_key);
        }
        Ok(removed)
    }

    // ========================================================================
    // COLUMNS
    // ========================================================================

    /// Removes `column_key` from every subrow in the index, not only from the
    /// addressed one, so the schema stays uniform.
    pub fn remove_column(
        &mut self,
        row_key: &str,
        sub_row_key: &str,
        column_key: &str,
    ) -> Result<(), PivotError> {
        self.sub_row(row_key, sub_row_key)?;

        let mut removed = 0usize;
        for row in self.rows.values_mut() {
            for sub_row in row.iter_mut() {
                if sub_row.remove(column_key).is_some() {
                    removed += 1;
                }
            }
        }
        debug!("removed column [{}] from {} subrows", column_key, removed);
        Ok(())
    }

    /// Number of columns in the schema, read from the representative subrow.
    pub fn column_count(&self) -> usize {
        self.representative().map_or(0, |sub_row| sub_row.len())
    }

    /// Column display names in schema order. Empty when there are no rows or
    /// the first row has no subrows.
    pub fn column_names(&self) -> Vec<String> {
        self.representative()
            .map(|sub_row| sub_row.columns().map(|cell| cell.name().to_string()).collect())
            .unwrap_or_default()
    }

    /// Column keys in schema order, read like `column_names`.
    pub fn column_keys(&self) -> Vec<String> {
        self.representative()
            .map(|sub_row| sub_row.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn column(
        &self,
        row_key: &str,
        sub_row_key: &str,
        column_key: &str,
    ) -> Result<&Cell<V>, PivotError> {
        self.sub_row(row_key, sub_row_key)?
            .get(column_key)
            .ok_or_else(|| PivotError::ColumnNotFound(column_key.to_string()))
    }

    pub fn get(&self, row_key: &str, sub_row_key: &str, column_key: &str) -> Result<&V, PivotError> {
        self.column(row_key, sub_row_key, column_key).map(Cell::value)
    }

    // ========================================================================
    // TRAVERSAL
    // ========================================================================

    /// Read-only walk over rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RowGroup<V>> {
        self.rows.values()
    }

    /// Removable cursor over rows in insertion order.
    pub fn cursor(&mut self) -> RowCursor<'_, RowGroup<V>> {
        RowCursor::new(&mut self.rows)
    }

    fn require_row(&self, row_key: &str) -> Result<&RowGroup<V>, PivotError> {
        self.rows
            .get(row_key)
            .ok_or_else(|| PivotError::RowNotFound(row_key.to_string()))
    }

    /// First subrow of the first row: the schema every other subrow mirrors.
    fn representative(&self) -> Option<&SubRowGroup<V>> {
        self.rows.first().and_then(|(_, row)| row.first())
    }

    /// First subrow anywhere in the index. Differs from `representative`
    /// only while the first row has no subrows.
    fn schema_template(&self) -> Option<&SubRowGroup<V>> {
        self.rows.values().find_map(|row| row.first())
    }
}

impl<V: Placeholder> PivotIndex<V> {
    /// Appends `sub_row` under `row_key` unless a subrow with that key is
    /// already there.
    ///
    /// The new subrow is rebuilt in schema order: its own cell for each schema
    /// key, a placeholder where it has none. Keys it carries beyond the schema
    /// follow in its own order and are backfilled into every other subrow, as
    /// `add_column` would.
    pub fn add_sub_row(&mut self, row_key: &str, sub_row: SubRowGroup<V>) -> Result<bool, PivotError> {
        let row = self.require_row(row_key)?;
        if row.contains(sub_row.key()) {
            warn!("subrow [{}] already present in row [{}], add ignored", sub_row.key(), row_key);
            return Ok(false);
        }

        let schema: Vec<(String, String)> = self
            .schema_template()
            .map(|template| {
                template
                    .columns()
                    .map(|cell| (cell.key().to_string(), cell.name().to_string()))
                    .collect()
            })
            .unwrap_or_default();
        let sub_row = conform(sub_row, &schema);

        let extra: Vec<(String, String)> = sub_row
            .columns()
            .skip(schema.len())
            .map(|cell| (cell.key().to_string(), cell.name().to_string()))
            .collect();
        if !extra.is_empty() {
            for other in self.rows.values_mut().flat_map(|row| row.iter_mut()) {
                for (key, name) in &extra {
                    trace!("backfill column [{}] into subrow [{}]", key, other.key());
                    other.insert(Cell::placeholder(key.clone(), name.clone()));
                }
            }
        }

        debug!("add subrow [{}] to row [{}]", sub_row.key(), row_key);
        let row = self
            .rows
            .get_mut(row_key)
            .ok_or_else(|| PivotError::RowNotFound(row_key.to_string()))?;
        Ok(row.insert(sub_row))
    }

    pub fn add_sub_rows(
        &mut self,
        row_key: &str,
        sub_rows: impl IntoIterator<Item = SubRowGroup<V>>,
    ) -> Result<(), PivotError> {
        for sub_row in sub_rows {
            self.add_sub_row(row_key, sub_row)?;
        }
        Ok(())
    }

    /// Writes `column` into the (`row_key`, `sub_row_key`) subrow and a
    /// placeholder cell with the same key and name into every other subrow.
    ///
    /// Subrows that already hold the column key keep their cell, including
    /// the addressed one: a second write to the same key does not update the
    /// value.
    pub fn add_column(&mut self, row_key: &str, sub_row_key: &str, column: Cell<V>) -> Result<(), PivotError> {
        self.sub_row(row_key, sub_row_key)?;

        let key = column.key().to_string();
        let name = column.name().to_string();
        let mut pending = Some(column);

        for row in self.rows.values_mut() {
            let is_target_row = row.key() == row_key;
            for sub_row in row.iter_mut() {
                let cell = if is_target_row && sub_row.key() == sub_row_key {
                    pending.take()
                } else {
                    None
                };
                let cell = cell.unwrap_or_else(|| Cell::placeholder(key.clone(), name.clone()));
                if !sub_row.insert(cell) {
                    trace!("subrow [{}] already holds column [{}]", sub_row.key(), key);
                }
            }
        }
        debug!("add column [{}] at [{}/{}]", key, row_key, sub_row_key);
        Ok(())
    }

    pub fn add_columns(
        &mut self,
        row_key: &str,
        sub_row_key: &str,
        columns: impl IntoIterator<Item = Cell<V>>,
    ) -> Result<(), PivotError> {
        for column in columns {
            self.add_column(row_key, sub_row_key, column)?;
        }
        Ok(())
    }
}

impl PivotIndex<CellValue> {
    /// The kind of value stored at the addressed cell.
    pub fn column_kind(
        &self,
        row_key: &str,
        sub_row_key: &str,
        column_key: &str,
    ) -> Result<ValueKind, PivotError> {
        self.get(row_key, sub_row_key, column_key).map(CellValue::kind)
    }
}

/// Reorders `sub_row` to follow `schema`, filling schema keys it lacks with
/// placeholders. Keys outside the schema keep their relative order at the end.
fn conform<V: Placeholder>(mut sub_row: SubRowGroup<V>, schema: &[(String, String)]) -> SubRowGroup<V> {
    let mut conformed = Group::new(sub_row.key(), sub_row.name());
    for (key, name) in schema {
        let cell = sub_row.remove(key).unwrap_or_else(|| {
            trace!("backfill column [{}] into new subrow [{}]", key, conformed.key());
            Cell::placeholder(key.clone(), name.clone())
        });
        conformed.insert(cell);
    }
    let extra: Vec<String> = sub_row.keys().map(str::to_string).collect();
    for key in extra {
        if let Some(cell) = sub_row.remove(&key) {
            conformed.insert(cell);
        }
    }
    conformed
}

impl<'a, V> IntoIterator for &'a PivotIndex<V> {
    type Item = &'a RowGroup<V>;
    type IntoIter = indexmap::map::Values<'a, String, RowGroup<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.values()
    }
}
