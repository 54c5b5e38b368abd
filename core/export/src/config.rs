//! FILENAME: core/export/src/config.rs
//! Exporter settings.
//!
//! Both structs deserialize from partial JSON; any field left out keeps its
//! default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::ExportError;

// ============================================================================
// XLSX
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct XlsxExportConfig {
    /// Worksheet name. Must be unique within one workbook.
    pub sheet_name: String,

    /// Header written above the row-key column of a flat export.
    pub key_header: String,

    pub bold_headers: bool,

    /// Appends a column summing each row's values.
    pub summary_column: bool,

    pub summary_label: String,

    /// Widens the first column to fit its longest entry.
    pub autofit_key_column: bool,

    /// Excel number format applied to numeric cells, e.g. `"#,##0.00"`.
    pub number_format: Option<String>,
}

impl Default for XlsxExportConfig {
    fn default() -> Self {
        XlsxExportConfig {
            sheet_name: "Sheet1".to_string(),
            key_header: String::new(),
            bold_headers: true,
            summary_column: false,
            summary_label: "Sum".to_string(),
            autofit_key_column: true,
            number_format: None,
        }
    }
}

impl XlsxExportConfig {
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }
}

// ============================================================================
// HTML
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HtmlExportConfig {
    pub caption: String,

    /// Shown, centered, where a row has no value for a column.
    pub empty_marker: String,

    /// Fraction digits for non-integral numbers.
    pub decimal_places: usize,

    pub border: u32,
}

impl Default for HtmlExportConfig {
    fn default() -> Self {
        HtmlExportConfig {
            caption: String::new(),
            empty_marker: "-".to_string(),
            decimal_places: 2,
            border: 1,
        }
    }
}

impl HtmlExportConfig {
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }
}
