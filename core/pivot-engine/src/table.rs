//! FILENAME: core/pivot-engine/src/table.rs
//! Dense, index-addressed snapshot of a flat pivot for table widgets.
//!
//! Column 0 is the row key column; data columns follow in the order of
//! `FlatPivotIndex::column_names`. Values are aligned to their column name,
//! so a row lacking a column yields `None` at that position.

use crate::flat::FlatPivotIndex;

pub const DEFAULT_KEY_HEADER: &str = "Key";

#[derive(Debug, Clone)]
pub struct PivotTable<V> {
    key_header: String,
    column_names: Vec<String>,
    row_names: Vec<String>,
    data: Vec<Vec<Option<V>>>,
}

impl<V: Clone> PivotTable<V> {
    pub fn from_flat(index: &FlatPivotIndex<V>) -> Self {
        let column_names = index.column_names();
        let mut row_names = Vec::with_capacity(index.row_count());
        let mut data = Vec::with_capacity(index.row_count());

        for (row_key, row) in index.iter() {
            row_names.push(row_key.to_string());
            data.push(
                column_names
                    .iter()
                    .map(|column| row.get(column.as_str()).cloned())
                    .collect(),
            );
        }

        PivotTable {
            key_header: DEFAULT_KEY_HEADER.to_string(),
            column_names,
            row_names,
            data,
        }
    }
}

impl<V> PivotTable<V> {
    pub fn with_key_header(mut self, header: impl Into<String>) -> Self {
        self.key_header = header.into();
        self
    }

    pub fn row_count(&self) -> usize {
        self.row_names.len()
    }

    /// Data columns plus the leading key column.
    pub fn column_count(&self) -> usize {
        self.column_names.len() + 1
    }

    pub fn column_name(&self, col: usize) -> Option<&str> {
        match col {
            0 => Some(&self.key_header),
            _ => self.column_names.get(col - 1).map(String::as_str),
        }
    }

    pub fn row_name(&self, row: usize) -> Option<&str> {
        self.row_names.get(row).map(String::as_str)
    }

    pub fn contains_column_name(&self, name: &str) -> bool {
        self.column_names.iter().any(|column| column == name)
    }

    /// The cell at (`row`, `col`). Column 0 holds no value, use `row_name`.
    pub fn value_at(&self, row: usize, col: usize) -> Option<&V> {
        if col == 0 {
            return None;
        }
        self.data.get(row)?.get(col - 1)?.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::CellValue;

    fn sample() -> FlatPivotIndex {
        let mut index = FlatPivotIndex::new();
        index.add("r1", "Name", CellValue::from("Jan"));
        index.add("r1", "Age", CellValue::from(30));
        index.add("r2", "Name", CellValue::from("Ola"));
        index
    }

    #[test]
    fn values_align_with_column_names() {
        let table = PivotTable::from_flat(&sample());

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column_name(0), Some("Key"));
        assert_eq!(table.column_name(1), Some("Name"));
        assert_eq!(table.column_name(2), Some("Age"));
        assert_eq!(table.column_name(3), None);

        assert_eq!(table.row_name(1), Some("r2"));
        assert_eq!(table.value_at(1, 1), Some(&CellValue::from("Ola")));
        assert_eq!(table.value_at(1, 2), None);
        assert_eq!(table.value_at(0, 2), Some(&CellValue::from(30)));
    }

    #[test]
    fn out_of_range_is_none() {
        let table = PivotTable::from_flat(&sample()).with_key_header("Klucz");
        assert_eq!(table.column_name(0), Some("Klucz"));
        assert_eq!(table.value_at(5, 1), None);
        assert_eq!(table.value_at(0, 0), None);
        assert_eq!(table.row_name(9), None);
    }

    #[test]
    fn snapshot_is_detached_from_index() {
        let mut index = sample();
        let table = PivotTable::from_flat(&index);
        index.remove_row("r1");

        assert!(table.contains_column_name("Age"));
        assert!(!table.contains_column_name("Klucz"));
        assert_eq!(table.row_count(), 2);
    }
}
