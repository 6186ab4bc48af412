//! Write field rows and empty templates

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::{DEFAULT_SHEET, FieldRow, cols};

/// Write an empty workbook with the expected sheet and header row
pub fn write_template(path: &Path) -> Result<()> {
    write_field_rows(path, DEFAULT_SHEET, &[])
}

/// Write field rows to a single-sheet workbook
pub fn write_field_rows(path: &Path, sheet: &str, rows: &[FieldRow]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet)?;
    write_header(worksheet)?;

    for (i, field) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        let cells = [
            &field.column_id,
            &field.entity,
            &field.field_name,
            &field.field_type,
            &field.default_value,
        ];
        for (col, value) in cells.into_iter().enumerate() {
            worksheet.write_string(row, col as u16, value.as_str())?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(())
}

fn write_header(ws: &mut Worksheet) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, name) in cols::ALL.into_iter().enumerate() {
        ws.write_string_with_format(0, col as u16, name, &bold)?;
        ws.set_column_width(col as u16, 20)?;
    }
    Ok(())
}
