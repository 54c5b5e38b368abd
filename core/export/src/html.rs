//! FILENAME: core/export/src/html.rs
//! Plain HTML table rendering of pivot indexes.

use crate::config::HtmlExportConfig;
use crate::render::{render_value, CellRenderer, ExportValue, RenderedValue};
use crate::ExportError;
use log::debug;
use pivot_engine::{FlatPivotIndex, PivotIndex};
use std::path::Path;

pub struct HtmlExporter<V> {
    config: HtmlExportConfig,
    renderer: Option<Box<dyn CellRenderer<V>>>,
}

impl<V: ExportValue> HtmlExporter<V> {
    pub fn new(config: HtmlExportConfig) -> Self {
        HtmlExporter { config, renderer: None }
    }

    pub fn set_renderer(&mut self, renderer: impl CellRenderer<V> + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    pub fn export_flat(&self, index: &FlatPivotIndex<V>, columns: &[String]) -> String {
        debug!("html export of {} rows x {} columns", index.row_count(), columns.len());
        let mut out = self.open_table();

        out.push_str("<tr><th></th>");
        for name in columns {
            push_header(&mut out, name);
        }
        out.push_str("</tr>\n");

        for (key, row) in index.iter() {
            out.push_str("<tr><td>");
            out.push_str(&escape_html(key));
            out.push_str("</td>");
            for name in columns {
                self.push_value(&mut out, row.get(name.as_str()));
            }
            out.push_str("</tr>\n");
        }

        out.push_str("</table>\n");
        out
    }

    /// The row name cell spans all of the row's subrows.
    pub fn export_grouped(&self, index: &PivotIndex<V>) -> String {
        let column_keys = index.column_keys();
        debug!("html export of {} rows x {} columns", index.rows_count(), column_keys.len());
        let mut out = self.open_table();

        out.push_str("<tr><th></th><th></th>");
        for name in index.column_names() {
            push_header(&mut out, &name);
        }
        out.push_str("</tr>\n");

        for row in index.iter() {
            let name = escape_html(row.name());
            if row.is_empty() {
                out.push_str(&format!("<tr><td>{}</td></tr>\n", name));
                continue;
            }

            for (i, sub_row) in row.sub_rows().enumerate() {
                out.push_str("<tr>");
                if i == 0 {
                    if row.len() > 1 {
                        out.push_str(&format!("<td rowspan=\"{}\">{}</td>", row.len(), name));
                    } else {
                        out.push_str(&format!("<td>{}</td>", name));
                    }
                }
                out.push_str(&format!("<td>{}</td>", escape_html(sub_row.name())));
                for key in &column_keys {
                    self.push_value(&mut out, sub_row.get(key).map(|cell| cell.value()));
                }
                out.push_str("</tr>\n");
            }
        }

        out.push_str("</table>\n");
        out
    }

    fn open_table(&self) -> String {
        let mut out = format!("<table border=\"{}\">\n", self.config.border);
        if !self.config.caption.is_empty() {
            out.push_str(&format!("<caption>{}</caption>\n", escape_html(&self.config.caption)));
        }
        out
    }

    fn push_value(&self, out: &mut String, value: Option<&V>) {
        let rendered = value.map(|v| render_value(self.renderer.as_deref(), v));
        match rendered {
            None | Some(RenderedValue::Blank) => {
                out.push_str(&format!("<td align=\"center\">{}</td>", escape_html(&self.config.empty_marker)));
            }
            Some(RenderedValue::Number(n)) => {
                out.push_str(&format!("<td align=\"right\">{}</td>", format_number(n, self.config.decimal_places)));
            }
            Some(RenderedValue::Text(s)) => {
                out.push_str(&format!("<td align=\"right\">{}</td>", escape_html(&s)));
            }
        }
    }
}

/// Writes rendered markup to `path`, replacing any existing file.
pub fn write_html(path: impl AsRef<Path>, html: &str) -> Result<(), ExportError> {
    std::fs::write(path, html)?;
    Ok(())
}

fn push_header(out: &mut String, name: &str) {
    out.push_str("<th>");
    out.push_str(&escape_html(name));
    out.push_str("</th>");
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Integral values print as plain digits; anything else is grouped by
/// thousands with a fixed number of decimals, e.g. `1,234.50`.
fn format_number(n: f64, decimals: usize) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{:.0}", n);
    }
    if !n.is_finite() {
        return n.to_string();
    }

    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if n < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
