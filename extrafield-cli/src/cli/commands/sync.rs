//! Sync commands: run, generate, update

use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;

use super::workbook::descriptor_from_sheet;
use crate::cli::{GenerateArgs, RunArgs, UpdateArgs};
use crate::config::Config;
use crate::entity::EntityKind;
use crate::output::{OutputFiles, OutputKind};
use crate::source::PgColumnSource;
use crate::sync::{PassOutcome, SyncContext, run_generate, run_update};

/// Update pass from the spreadsheet (when configured), then generate pass
pub async fn handle_run(args: RunArgs, config: &Config) -> Result<()> {
    let mut failed = false;

    // An unreadable spreadsheet only costs the update pass
    let mut sheet_error = None;
    let update_input = match descriptor_from_sheet(&args.sheet, args.table.as_deref()) {
        Ok(descriptor) => descriptor.filter(|s| !s.is_empty()),
        Err(err) => {
            eprintln!("{} {:#}", "Spreadsheet could not be read:".red().bold(), err);
            failed = true;
            sheet_error = Some(err);
            None
        }
    };

    let generate_input = args.input.as_deref().filter(|s| !s.is_empty());

    if update_input.is_none() && generate_input.is_none() {
        if let Some(err) = sheet_error {
            return Err(err);
        }
        bail!("INPUT_STRING and TABLE_NAME must be set (or EXCEL_PATH for the update pass)");
    }

    let table = args
        .table
        .as_deref()
        .context("TABLE_NAME must be set")?;
    EntityKind::for_table(table)?;
    let account_id = args
        .account_id
        .context("ACCOUNT_ID must be set")?
        .to_string();

    let files = OutputFiles::new(config.output.clone());
    files.prepare()?;
    let source = connect(config).await?;

    let ctx = SyncContext {
        source: &source,
        files: &files,
        table,
        account_id: &account_id,
    };

    // Result files holding the error of a failed pass
    let mut error_files: Vec<PathBuf> = Vec::new();

    if let Some(input) = &update_input {
        // Keep going after a failed update pass; the generate pass is independent
        match run_update(&ctx, input).await {
            Ok(outcome) => report("update", &outcome, &files),
            Err(err) => {
                eprintln!("{} {:#}", "Update pass failed:".red().bold(), err);
                error_files.push(files.path(OutputKind::Log));
                failed = true;
            }
        }
    }

    match generate_input {
        Some(input) => match run_generate(&ctx, input).await {
            Ok(outcome) => report("generate", &outcome, &files),
            Err(err) => {
                eprintln!("{} {:#}", "Generate pass failed:".red().bold(), err);
                error_files.push(files.path(OutputKind::Inserts));
                failed = true;
            }
        },
        None => eprintln!(
            "{}",
            "Error: INPUT_STRING must be set for the generate pass.".red()
        ),
    }

    source.close().await;

    if !failed {
        return Ok(());
    }
    if error_files.is_empty() {
        bail!("One or more passes failed");
    }
    let paths: Vec<String> = error_files
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    bail!("One or more passes failed, details written to {}", paths.join(", "))
}

pub async fn handle_generate(args: GenerateArgs, config: &Config) -> Result<()> {
    let input = match args.input {
        Some(input) => input,
        None => descriptor_from_sheet(&args.sheet, Some(&args.target.table))?
            .context("Provide a descriptor string (--input / INPUT_STRING) or a spreadsheet (--excel)")?,
    };

    let files = OutputFiles::new(config.output.clone());
    files.prepare()?;
    let source = connect(config).await?;
    let account_id = args.target.account_id.to_string();

    let ctx = SyncContext {
        source: &source,
        files: &files,
        table: &args.target.table,
        account_id: &account_id,
    };

    let result = run_generate(&ctx, &input).await;
    source.close().await;

    report("generate", &result?, &files);
    Ok(())
}

pub async fn handle_update(args: UpdateArgs, config: &Config) -> Result<()> {
    let input = match args.input {
        Some(input) => input,
        None => descriptor_from_sheet(&args.sheet, Some(&args.target.table))?
            .context("No spreadsheet given. Use --excel or set EXCEL_PATH.")?,
    };

    let files = OutputFiles::new(config.output.clone());
    files.prepare()?;
    let source = connect(config).await?;
    let account_id = args.target.account_id.to_string();

    let ctx = SyncContext {
        source: &source,
        files: &files,
        table: &args.target.table,
        account_id: &account_id,
    };

    let result = run_update(&ctx, &input).await;
    source.close().await;

    report("update", &result?, &files);
    Ok(())
}

async fn connect(config: &Config) -> Result<PgColumnSource> {
    config.database.validate()?;
    PgColumnSource::connect(&config.database).await
}

/// Print a pass's alerts and counters
fn report(pass: &str, outcome: &PassOutcome, files: &OutputFiles) {
    let summary = outcome.summary();

    if let PassOutcome::Aborted { column, alerts, .. } = outcome {
        for alert in alerts {
            println!("{}", alert.to_string().yellow());
        }
        println!(
            "{} {} pass stopped at {}; fix the data and re-run",
            "✗".red().bold(),
            pass,
            column.bold()
        );
        log::warn!("{} pass aborted at {} with {} alerts", pass, column, alerts.len());
        return;
    }

    println!(
        "{} {} pass: {} fields",
        "✓".green().bold(),
        pass,
        summary.fields
    );
    if summary.inserts > 0 {
        println!(
            "  {} inserts -> {}",
            summary.inserts,
            files.path(OutputKind::Inserts).display()
        );
    }
    if summary.updates > 0 {
        println!(
            "  {} updates -> {}",
            summary.updates,
            files.path(OutputKind::Updates).display()
        );
    }
    if summary.case_conflicts > 0 {
        println!(
            "  {} fields with case-only differences -> {}",
            summary.case_conflicts.to_string().yellow(),
            files.path(OutputKind::Mappable).display()
        );
    }
    if summary.missing_columns > 0 {
        println!("  {} columns not found, skipped", summary.missing_columns);
    }
    if summary.unchanged > 0 {
        println!("  {} fields already up to date", summary.unchanged);
    }
}
