//! Spreadsheet commands: descriptor and template

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::cli::{DescriptorArgs, SheetArgs};
use crate::descriptor::build_descriptor_string;
use crate::entity::EntityKind;
use crate::workbook::{read_field_rows, write_template};

/// Entity used when neither --entity nor a known table is given
const FALLBACK_ENTITY: &str = "Candidate";

/// Entity label selecting spreadsheet rows
pub fn resolve_entity(sheet: &SheetArgs, table: Option<&str>) -> String {
    if let Some(entity) = &sheet.entity {
        return entity.clone();
    }
    table
        .and_then(EntityKind::from_table_name)
        .map(|kind| kind.label().to_string())
        .unwrap_or_else(|| FALLBACK_ENTITY.to_string())
}

/// Build the descriptor string from the spreadsheet, if one is configured
pub fn descriptor_from_sheet(sheet: &SheetArgs, table: Option<&str>) -> Result<Option<String>> {
    let Some(path) = &sheet.excel else {
        return Ok(None);
    };

    let entity = resolve_entity(sheet, table);
    if EntityKind::from_label(&entity).is_none() {
        log::warn!("Entity '{}' does not match any known custom-data table", entity);
    }

    let rows = read_field_rows(path, &sheet.sheet, &entity)?;
    Ok(Some(build_descriptor_string(&rows)))
}

pub fn handle_descriptor(args: DescriptorArgs) -> Result<()> {
    let descriptor = descriptor_from_sheet(&args.sheet, args.table.as_deref())?
        .context("No spreadsheet given. Use --excel or set EXCEL_PATH.")?;

    if descriptor.is_empty() {
        eprintln!("{}", "No rows matched the selected entity".yellow());
    }
    println!("{}", descriptor);
    Ok(())
}

pub fn handle_template(path: &Path) -> Result<()> {
    write_template(path)?;
    println!("Wrote template to {}", path.display().to_string().cyan());
    Ok(())
}
