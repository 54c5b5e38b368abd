//! FILENAME: core/export/src/render.rs
//! Converting opaque pivot values into something a sheet or table can show.
//!
//! Every exported cell goes through the same two steps: an optional
//! `CellRenderer` sees the raw value first and may decide how it is shown;
//! when it declines, the value's own `ExportValue` conversion applies.

use engine::CellValue;

/// A value ready to be written to a sheet or table.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedValue {
    Number(f64),
    Text(String),
    Blank,
}

/// Default conversion of a cell value for export.
pub trait ExportValue {
    fn to_rendered(&self) -> RenderedValue;
}

impl ExportValue for CellValue {
    fn to_rendered(&self) -> RenderedValue {
        match self {
            CellValue::Empty => RenderedValue::Blank,
            CellValue::Number(n) => RenderedValue::Number(*n),
            CellValue::Text(s) => RenderedValue::Text(s.clone()),
            CellValue::Boolean(_) => RenderedValue::Text(self.display_value()),
        }
    }
}

impl ExportValue for String {
    fn to_rendered(&self) -> RenderedValue {
        RenderedValue::Text(self.clone())
    }
}

impl ExportValue for &str {
    fn to_rendered(&self) -> RenderedValue {
        RenderedValue::Text((*self).to_string())
    }
}

impl ExportValue for f64 {
    fn to_rendered(&self) -> RenderedValue {
        RenderedValue::Number(*self)
    }
}

impl ExportValue for i64 {
    fn to_rendered(&self) -> RenderedValue {
        RenderedValue::Number(*self as f64)
    }
}

impl<T: ExportValue> ExportValue for Option<T> {
    fn to_rendered(&self) -> RenderedValue {
        self.as_ref().map_or(RenderedValue::Blank, ExportValue::to_rendered)
    }
}

/// Per-cell hook invoked with the raw value before default formatting.
/// Returning `None` keeps the default.
pub trait CellRenderer<V: ?Sized> {
    fn render(&self, value: &V) -> Option<RenderedValue>;
}

impl<V: ?Sized, F> CellRenderer<V> for F
where
    F: Fn(&V) -> Option<RenderedValue>,
{
    fn render(&self, value: &V) -> Option<RenderedValue> {
        self(value)
    }
}

pub(crate) fn render_value<V, R>(renderer: Option<&R>, value: &V) -> RenderedValue
where
    V: ExportValue,
    R: CellRenderer<V> + ?Sized,
{
    renderer
        .and_then(|r| r.render(value))
        .unwrap_or_else(|| value.to_rendered())
}
