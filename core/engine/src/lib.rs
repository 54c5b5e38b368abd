//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Shared types for the pivot crates.
//! CONTEXT: `pivot-engine` stores `CellValue`s by default and `pivot-export`
//! uses the coordinate helpers to address worksheet cells.

pub mod cell;
pub mod coord;

// Re-export commonly used types at the crate root
pub use cell::{CellValue, ValueKind};
pub use coord::{coord_to_a1, index_to_col, range_to_a1, CellCoord};
