//! FILENAME: core/pivot-engine/src/group.rs
//! Pivot entities - the keyed building blocks of a two-level pivot.
//!
//! Ownership runs top-down: a `RowGroup` owns its `SubRowGroup`s, which own
//! their `Cell`s. Every level is an insertion-ordered map keyed by the
//! child's natural key, and inserting a key that is already present is a
//! no-op (insert-or-ignore). Nothing is ever replaced in place.

use std::hash::{Hash, Hasher};

use engine::CellValue;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

/// Insertion-ordered map keyed by an entity's natural key.
pub type KeyMap<T> = IndexMap<String, T, FxBuildHasher>;

// ============================================================================
// PLACEHOLDER VALUES
// ============================================================================

/// Value types that can synthesize the "empty placeholder" written into
/// cells that never received an explicit value for a column.
pub trait Placeholder {
    fn placeholder() -> Self;
}

impl Placeholder for CellValue {
    fn placeholder() -> Self {
        CellValue::placeholder()
    }
}

impl Placeholder for String {
    fn placeholder() -> Self {
        String::new()
    }
}

impl<T> Placeholder for Option<T> {
    fn placeholder() -> Self {
        None
    }
}

// ============================================================================
// KEYED ENTITIES
// ============================================================================

/// Anything stored in a `Group` is addressed by a stable string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// A (key, name, value) triple stored at column granularity.
///
/// Identity is the key alone: two cells with the same key are equal no matter
/// what name or value they carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell<V = CellValue> {
    key: String,
    name: String,
    value: V,
}

impl<V> Cell<V> {
    pub fn new(key: impl Into<String>, name: impl Into<String>, value: V) -> Self {
        Cell {
            key: key.into(),
            name: name.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V: Placeholder> Cell<V> {
    /// A cell with the same key and name holding the empty placeholder.
    pub fn placeholder(key: impl Into<String>, name: impl Into<String>) -> Self {
        Cell::new(key, name, V::placeholder())
    }
}

impl<V> Keyed for Cell<V> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl<V> PartialEq for Cell<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<V> Eq for Cell<V> {}

impl<V> Hash for Cell<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

// ============================================================================
// GROUPS
// ============================================================================

/// A named, keyed container of child entries.
///
/// Used at two levels: `SubRowGroup` (holds `Cell`s keyed by column key) and
/// `RowGroup` (holds `SubRowGroup`s keyed by subrow key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group<T> {
    key: String,
    name: String,
    entries: KeyMap<T>,
}

/// Second-level group: one record of cells.
pub type SubRowGroup<V = CellValue> = Group<Cell<V>>;

/// Top-level group: a set of subrows sharing a row label.
pub type RowGroup<V = CellValue> = Group<SubRowGroup<V>>;

impl<T: Keyed> Group<T> {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Group {
            key: key.into(),
            name: name.into(),
            entries: KeyMap::default(),
        }
    }

    /// Builds a group from pre-populated entries. Later duplicates of an
    /// earlier key are dropped.
    pub fn with_entries(
        key: impl Into<String>,
        name: impl Into<String>,
        entries: impl IntoIterator<Item = T>,
    ) -> Self {
        let mut group = Group::new(key, name);
        for entry in entries {
            group.insert(entry);
        }
        group
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    pub fn first(&self) -> Option<&T> {
        self.entries.first().map(|(_, entry)| entry)
    }

    /// Appends `entry` unless an entry with the same key already exists.
    /// Returns whether the entry was inserted.
    pub fn insert(&mut self, entry: T) -> bool {
        if self.entries.contains_key(entry.key()) {
            return false;
        }
        self.entries.insert(entry.key().to_string(), entry);
        true
    }

    /// Removes the entry with `key`, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<T> Keyed for Group<T> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl<T> PartialEq for Group<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Group<T> {}

impl<T> Hash for Group<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<V> Group<Cell<V>> {
    /// Cells of this subrow in column order.
    pub fn columns(&self) -> impl Iterator<Item = &Cell<V>> {
        self.entries.values()
    }
}

impl<V> Group<Group<Cell<V>>> {
    /// Subrows of this row in insertion order.
    pub fn sub_rows(&self) -> impl Iterator<Item = &SubRowGroup<V>> {
        self.entries.values()
    }
}
