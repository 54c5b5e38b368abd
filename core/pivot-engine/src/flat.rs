//! FILENAME: core/pivot-engine/src/flat.rs
//! Flat pivot index (row x column).
//!
//! Unlike `PivotIndex`, rows here may carry different column sets: a write
//! never backfills other rows, and `column_names` is the ordered union over
//! all rows. A row whose last column is removed is pruned.

use engine::CellValue;
use indexmap::IndexSet;
use log::debug;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::cursor::RowCursor;
use crate::error::PivotError;
use crate::group::KeyMap;

/// The columns of one flat row, keyed by column key.
pub type ColumnMap<V> = KeyMap<V>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatPivotIndex<V = CellValue> {
    rows: KeyMap<ColumnMap<V>>,
}

impl<V> Default for FlatPivotIndex<V> {
    fn default() -> Self {
        FlatPivotIndex {
            rows: KeyMap::default(),
        }
    }
}

impl<V> FlatPivotIndex<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets (overwriting) the value at (`row_key`, `column_key`), creating the
    /// row on first use.
    pub fn add(&mut self, row_key: impl Into<String>, column_key: impl Into<String>, value: V) {
        self.rows
            .entry(row_key.into())
            .or_default()
            .insert(column_key.into(), value);
    }

    /// Inserts or replaces a whole row. A replaced row keeps its position.
    /// A row without columns is never stored, so an empty `columns` removes
    /// any existing row under `row_key`.
    pub fn add_row<K: Into<String>>(
        &mut self,
        row_key: impl Into<String>,
        columns: impl IntoIterator<Item = (K, V)>,
    ) {
        let row_key = row_key.into();
        let row: ColumnMap<V> = columns.into_iter().map(|(k, v)| (k.into(), v)).collect();
        if row.is_empty() {
            if self.rows.shift_remove(&row_key).is_some() {
                debug!("row [{}] replaced by an empty row, removed", row_key);
            }
            return;
        }
        self.rows.insert(row_key, row);
    }

    /// Fills `column_key` in every existing row with a copy of `value` made by
    /// `duplicate`.
    ///
    /// All copies are made before anything is written: if `duplicate` returns
    /// `None` for any row the index is left unchanged and
    /// `DuplicateUnsupported` is returned.
    pub fn add_column_with<F>(&mut self, column_key: &str, value: V, mut duplicate: F) -> Result<(), PivotError>
    where
        F: FnMut(&V) -> Option<V>,
    {
        let copies = (0..self.rows.len())
            .map(|_| duplicate(&value))
            .collect::<Option<Vec<V>>>()
            .ok_or_else(|| PivotError::DuplicateUnsupported(column_key.to_string()))?;

        for (row, copy) in self.rows.values_mut().zip(copies) {
            row.insert(column_key.to_string(), copy);
        }
        debug!("filled column [{}] across {} rows", column_key, self.rows.len());
        Ok(())
    }

    /// Fills `column_key` per row from `values`. Rows not named in `values`
    /// are left without the column; rows named there but absent are created.
    pub fn add_column_from<K: Into<String>>(&mut self, column_key: &str, values: impl IntoIterator<Item = (K, V)>) {
        for (row_key, value) in values {
            self.add(row_key, column_key, value);
        }
    }

    /// Removes `column_key` from every row, pruning rows left without columns.
    pub fn remove_column(&mut self, column_key: &str) {
        let before = self.rows.len();
        self.rows.retain(|_, row| {
            row.shift_remove(column_key);
            !row.is_empty()
        });
        debug!(
            "removed column [{}], pruned {} empty rows",
            column_key,
            before - self.rows.len()
        );
    }

    pub fn remove_row(&mut self, row_key: &str) -> Option<ColumnMap<V>> {
        self.rows.shift_remove(row_key)
    }

    pub fn get(&self, row_key: &str, column_key: &str) -> Option<&V> {
        self.rows.get(row_key).and_then(|row| row.get(column_key))
    }

    pub fn row(&self, row_key: &str) -> Option<&ColumnMap<V>> {
        self.rows.get(row_key)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row_key: &str) -> bool {
        self.rows.contains_key(row_key)
    }

    /// Row keys in insertion order.
    pub fn row_names(&self) -> Vec<String> {
        self.rows.keys().cloned().collect()
    }

    /// Ordered union of column keys over all rows, first appearance wins.
    pub fn column_names(&self) -> Vec<String> {
        let mut columns: IndexSet<&str, FxBuildHasher> = IndexSet::default();
        for row in self.rows.values() {
            columns.extend(row.keys().map(String::as_str));
        }
        columns.into_iter().map(str::to_string).collect()
    }

    /// Read-only walk over (row key, columns) in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnMap<V>)> {
        self.rows.iter().map(|(key, row)| (key.as_str(), row))
    }

    /// Removable cursor over rows; `remove` drops the whole row.
    pub fn cursor(&mut self) -> RowCursor<'_, ColumnMap<V>> {
        RowCursor::new(&mut self.rows)
    }
}

impl<V: Clone> FlatPivotIndex<V> {
    /// `add_column_with` for values that can always be cloned.
    pub fn add_column_cloned(&mut self, column_key: &str, value: V) {
        for row in self.rows.values_mut() {
            row.insert(column_key.to_string(), value.clone());
        }
    }
}
