//! FILENAME: core/export/src/xlsx_writer.rs

use crate::config::XlsxExportConfig;
use crate::render::{render_value, CellRenderer, ExportValue, RenderedValue};
use crate::ExportError;
use engine::range_to_a1;
use log::debug;
use pivot_engine::{FlatPivotIndex, PivotIndex};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;

const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Writes pivot indexes into worksheets of a single workbook.
pub struct XlsxExporter<V> {
    workbook: Workbook,
    renderer: Option<Box<dyn CellRenderer<V>>>,
}

impl<V: ExportValue> Default for XlsxExporter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ExportValue> XlsxExporter<V> {
    pub fn new() -> Self {
        XlsxExporter {
            workbook: Workbook::new(),
            renderer: None,
        }
    }

    pub fn set_renderer(&mut self, renderer: impl CellRenderer<V> + 'static) {
        self.renderer = Some(Box::new(renderer));
    }

    /// Adds one sheet: a header row, then one row per pivot row with its key
    /// in column A and the values of `columns` after it.
    pub fn export_flat(
        &mut self,
        index: &FlatPivotIndex<V>,
        columns: &[String],
        config: &XlsxExportConfig,
    ) -> Result<(), ExportError> {
        check_bounds(index.row_count() + 1, columns.len() + 2)?;
        debug!(
            "xlsx export of {} rows x {} columns into sheet [{}]",
            index.row_count(),
            columns.len(),
            config.sheet_name
        );

        let formats = SheetFormats::new(config);
        let renderer = self.renderer.as_deref();
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&config.sheet_name)?;

        worksheet.write_string_with_format(0, 0, &config.key_header, &formats.header)?;
        for (i, name) in columns.iter().enumerate() {
            worksheet.write_string_with_format(0, (i + 1) as u16, name, &formats.header)?;
        }
        let summary_col = (columns.len() + 1) as u16;
        if config.summary_column {
            worksheet.write_string_with_format(0, summary_col, &config.summary_label, &formats.header)?;
        }

        let mut key_width = config.key_header.chars().count();
        for (i, (key, row)) in index.iter().enumerate() {
            let sheet_row = (i + 1) as u32;
            worksheet.write_string(sheet_row, 0, key)?;
            key_width = key_width.max(key.chars().count());

            for (c, name) in columns.iter().enumerate() {
                if let Some(value) = row.get(name.as_str()) {
                    let rendered = render_value(renderer, value);
                    write_rendered(worksheet, sheet_row, (c + 1) as u16, &rendered, formats.number.as_ref())?;
                }
            }

            if config.summary_column && !columns.is_empty() {
                let cells = range_to_a1((sheet_row, 1), (sheet_row, columns.len() as u32));
                worksheet.write_formula(sheet_row, summary_col, format!("SUM({})", cells).as_str())?;
            }
        }

        if config.autofit_key_column {
            worksheet.set_column_width(0, fit_width(key_width))?;
        }
        Ok(())
    }

    /// Adds one sheet for a two-level index: row names in column A, spanning
    /// their subrows, subrow names in column B, values from column C.
    pub fn export_grouped(&mut self, index: &PivotIndex<V>, config: &XlsxExportConfig) -> Result<(), ExportError> {
        let column_names = index.column_names();
        let column_keys = index.column_keys();
        let sheet_rows: usize = index.iter().map(|row| row.len().max(1)).sum();
        check_bounds(sheet_rows + 1, column_keys.len() + 2)?;
        debug!(
            "xlsx export of {} rows ({} sheet rows) into sheet [{}]",
            index.rows_count(),
            sheet_rows,
            config.sheet_name
        );

        let formats = SheetFormats::new(config);
        let renderer = self.renderer.as_deref();
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&config.sheet_name)?;

        for (i, name) in column_names.iter().enumerate() {
            worksheet.write_string_with_format(0, (i + 2) as u16, name, &formats.header)?;
        }

        let mut sheet_row: u32 = 1;
        let mut name_width = 0;
        for row in index.iter() {
            let span = row.len().max(1) as u32;
            name_width = name_width.max(row.name().chars().count());
            if span > 1 {
                worksheet.merge_range(sheet_row, 0, sheet_row + span - 1, 0, row.name(), &formats.group)?;
            } else {
                worksheet.write_string_with_format(sheet_row, 0, row.name(), &formats.group)?;
            }

            for (offset, sub_row) in row.sub_rows().enumerate() {
                let target = sheet_row + offset as u32;
                worksheet.write_string(target, 1, sub_row.name())?;
                for (c, key) in column_keys.iter().enumerate() {
                    if let Some(cell) = sub_row.get(key) {
                        let rendered = render_value(renderer, cell.value());
                        write_rendered(worksheet, target, (c + 2) as u16, &rendered, formats.number.as_ref())?;
                    }
                }
            }
            sheet_row += span;
        }

        if config.autofit_key_column {
            worksheet.set_column_width(0, fit_width(name_width))?;
        }
        Ok(())
    }

    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.workbook.save(path.as_ref())?;
        debug!("workbook saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, ExportError> {
        Ok(self.workbook.save_to_buffer()?)
    }
}

struct SheetFormats {
    header: Format,
    group: Format,
    number: Option<Format>,
}

impl SheetFormats {
    fn new(config: &XlsxExportConfig) -> Self {
        let header = if config.bold_headers {
            Format::new().set_bold().set_align(FormatAlign::Center)
        } else {
            Format::new()
        };
        let group = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::Top);
        let number = config
            .number_format
            .as_deref()
            .map(|pattern| Format::new().set_num_format(pattern));

        SheetFormats { header, group, number }
    }
}

fn write_rendered(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &RenderedValue,
    number_format: Option<&Format>,
) -> Result<(), ExportError> {
    match value {
        RenderedValue::Blank => {}
        RenderedValue::Number(n) => {
            if let Some(fmt) = number_format {
                worksheet.write_number_with_format(row, col, *n, fmt)?;
            } else {
                worksheet.write_number(row, col, *n)?;
            }
        }
        RenderedValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

fn check_bounds(rows: usize, cols: usize) -> Result<(), ExportError> {
    if rows > MAX_ROWS {
        return Err(ExportError::OutOfBounds(format!("{} rows exceed the limit of {}", rows, MAX_ROWS)));
    }
    if cols > MAX_COLS {
        return Err(ExportError::OutOfBounds(format!("{} columns exceed the limit of {}", cols, MAX_COLS)));
    }
    Ok(())
}

// Excel widths are in characters; pad a little for the default font.
fn fit_width(chars: usize) -> f64 {
    (chars as f64 + 2.0).min(255.0)
}
