//! FILENAME: core/export/src/lib.rs
//! Pivot Export Module
//!
//! Renders `PivotIndex` and `FlatPivotIndex` contents to XLSX worksheets and
//! HTML tables. Exporters only read the indexes; they never mutate them.

mod config;
mod error;
mod html;
mod render;
mod xlsx_writer;

pub use config::{HtmlExportConfig, XlsxExportConfig};
pub use error::ExportError;
pub use html::{escape_html, write_html, HtmlExporter};
pub use render::{CellRenderer, ExportValue, RenderedValue};
pub use xlsx_writer::XlsxExporter;
