//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot matrix subsystem.
//!
//! Accumulates tabular report data incrementally and exposes it for
//! rendering. Values are opaque to this crate: callers pre-compute them and
//! renderers interpret them. It depends on `engine` only for the default
//! value type (`CellValue`).
//!
//! Layers:
//! - `group`: Keyed entities (Cell, SubRowGroup, RowGroup)
//! - `index`: Two-level pivot with a uniform column schema
//! - `flat`: One-level pivot with a per-row column set
//! - `cursor`: Ordered row cursor with in-place removal
//! - `table`: Dense snapshot of a flat pivot
//!
//! All types are single-threaded by contract: build an index sequentially,
//! then hand it out read-only.

pub mod cursor;
pub mod error;
pub mod flat;
pub mod group;
pub mod index;
pub mod table;

pub use cursor::RowCursor;
pub use error::PivotError;
pub use flat::{ColumnMap, FlatPivotIndex};
pub use group::{Cell, Group, KeyMap, Keyed, Placeholder, RowGroup, SubRowGroup};
pub use index::PivotIndex;
pub use table::{PivotTable, DEFAULT_KEY_HEADER};
