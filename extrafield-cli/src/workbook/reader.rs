//! Read field rows from an Excel workbook

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};

use super::{FieldRow, cols};

/// Header positions of the required columns
struct ColumnIndices {
    column_id: usize,
    entity: usize,
    field_name: usize,
    field_type: usize,
    default_value: usize,
}

/// Read the rows of `sheet` whose `entity` cell equals `entity`
///
/// Empty cells read as empty strings; rows that are entirely empty are
/// skipped.
pub fn read_field_rows(path: &Path, sheet: &str, entity: &str) -> Result<Vec<FieldRow>> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("Failed to read sheet: {}", sheet))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        bail!("Sheet '{}' is empty", sheet);
    };
    let indices = parse_header(header, sheet)?;

    let mut fields = Vec::new();
    for row in rows {
        if row.iter().all(|c| get_cell_string(c).trim().is_empty()) {
            continue;
        }

        let cell = |idx: usize| row.get(idx).map(get_cell_string).unwrap_or_default();

        let field = FieldRow {
            column_id: cell(indices.column_id),
            entity: cell(indices.entity),
            field_name: cell(indices.field_name),
            field_type: cell(indices.field_type),
            default_value: cell(indices.default_value),
        };

        if field.entity == entity {
            fields.push(field);
        }
    }

    log::info!(
        "Read {} field rows for entity '{}' from {} ({})",
        fields.len(),
        entity,
        path.display(),
        sheet
    );

    Ok(fields)
}

fn parse_header(header: &[Data], sheet: &str) -> Result<ColumnIndices> {
    let names: Vec<String> = header
        .iter()
        .map(|c| get_cell_string(c).trim().to_string())
        .collect();
    let find = |name: &str| names.iter().position(|n| n == name);

    let missing: Vec<&str> = cols::ALL
        .into_iter()
        .filter(|name| find(name).is_none())
        .collect();
    if !missing.is_empty() {
        bail!(
            "Missing required columns in sheet '{}': {} (expected: {})",
            sheet,
            missing.join(", "),
            cols::ALL.join(", ")
        );
    }

    // Presence checked above
    let idx = |name: &str| find(name).unwrap_or_default();
    Ok(ColumnIndices {
        column_id: idx(cols::COLUMN_ID),
        entity: idx(cols::ENTITY),
        field_name: idx(cols::FIELD_NAME),
        field_type: idx(cols::FIELD_TYPE),
        default_value: idx(cols::DEFAULT_VALUE),
    })
}

fn get_cell_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole numbers come back as floats; column ids must not grow a ".0"
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::{DEFAULT_SHEET, write_field_rows};
    use rust_xlsxwriter::Workbook;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("extrafield-{}-{}.xlsx", name, std::process::id()))
    }

    fn row(column_id: &str, entity: &str, name: &str, ty: &str, default: &str) -> FieldRow {
        FieldRow {
            column_id: column_id.into(),
            entity: entity.into(),
            field_name: name.into(),
            field_type: ty.into(),
            default_value: default.into(),
        }
    }

    #[test]
    fn test_reads_rows_for_entity() {
        let path = temp_path("entity-filter");
        let rows = vec![
            row("1", "Candidate", "Status", "dropdown", "Open,Closed"),
            row("2", "Contact", "Title", "text", ""),
            row("3", "Candidate", "Skills", "multiselect", "Rust"),
        ];
        write_field_rows(&path, DEFAULT_SHEET, &rows).unwrap();

        let read = read_field_rows(&path, DEFAULT_SHEET, "Candidate").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(read, vec![rows[0].clone(), rows[2].clone()]);
    }

    #[test]
    fn test_numeric_cells_and_column_order() {
        let path = temp_path("numeric");
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name(DEFAULT_SHEET).unwrap();
        // Shuffled header order, numeric column id, blank default
        ws.write_string(0, 0, "entity").unwrap();
        ws.write_string(0, 1, "defaultvalue").unwrap();
        ws.write_string(0, 2, "columnid").unwrap();
        ws.write_string(0, 3, "extrafieldtype").unwrap();
        ws.write_string(0, 4, "extrafieldname").unwrap();
        ws.write_string(1, 0, "Job").unwrap();
        ws.write_number(1, 2, 17.0).unwrap();
        ws.write_string(1, 3, "date").unwrap();
        ws.write_string(1, 4, "Start").unwrap();
        workbook.save(&path).unwrap();

        let read = read_field_rows(&path, DEFAULT_SHEET, "Job").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(read, vec![row("17", "Job", "Start", "date", "")]);
    }

    #[test]
    fn test_missing_columns_error() {
        let path = temp_path("missing-cols");
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name(DEFAULT_SHEET).unwrap();
        ws.write_string(0, 0, "columnid").unwrap();
        ws.write_string(0, 1, "entity").unwrap();
        workbook.save(&path).unwrap();

        let err = read_field_rows(&path, DEFAULT_SHEET, "Candidate").unwrap_err();
        std::fs::remove_file(&path).ok();

        let msg = err.to_string();
        assert!(msg.contains("extrafieldname"));
        assert!(msg.contains("defaultvalue"));
    }

    #[test]
    fn test_missing_sheet_error() {
        let path = temp_path("missing-sheet");
        write_field_rows(&path, "other", &[]).unwrap();

        let result = read_field_rows(&path, DEFAULT_SHEET, "Candidate");
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
