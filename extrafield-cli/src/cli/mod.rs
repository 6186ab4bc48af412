//! Command-line interface

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::workbook::DEFAULT_SHEET;

#[derive(Parser)]
#[command(name = "extrafield-cli")]
#[command(about = "Reconcile custom-field metadata with the values stored in PostgreSQL")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// TOML config file with [database] and [output] sections
    #[arg(long, global = true, env = "EXTRAFIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the default `run` command
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Update pass from the spreadsheet, then generate pass from INPUT_STRING (default)
    Run(RunArgs),
    /// Emit INSERT statements for a descriptor string
    Generate(GenerateArgs),
    /// Emit UPDATE statements for the spreadsheet's fields
    Update(UpdateArgs),
    /// Print the descriptor string built from the spreadsheet
    Descriptor(DescriptorArgs),
    /// Write an empty spreadsheet with the expected columns
    Template {
        /// Where to write the workbook
        #[arg(default_value = "extra_fields.xlsx")]
        path: PathBuf,
    },
}

/// Which table and account the generated SQL targets
#[derive(Args, Clone)]
pub struct TargetArgs {
    /// Custom-data table, e.g. candidate_custom_data
    #[arg(long, env = "TABLE_NAME")]
    pub table: String,

    /// Account the metadata rows belong to
    #[arg(long, env = "ACCOUNT_ID")]
    pub account_id: i64,
}

/// Where the field spreadsheet lives
#[derive(Args, Clone, Default)]
pub struct SheetArgs {
    /// Path to the .xlsx workbook
    #[arg(long, env = "EXCEL_PATH")]
    pub excel: Option<PathBuf>,

    /// Sheet holding the field rows
    #[arg(long, env = "SHEET_NAME", default_value = DEFAULT_SHEET)]
    pub sheet: String,

    /// Entity label to select rows by; defaults to the table's entity
    #[arg(long, env = "ENTITY")]
    pub entity: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct RunArgs {
    #[arg(long, env = "TABLE_NAME")]
    pub table: Option<String>,

    #[arg(long, env = "ACCOUNT_ID")]
    pub account_id: Option<i64>,

    /// Descriptor string for the generate pass
    #[arg(long, env = "INPUT_STRING")]
    pub input: Option<String>,

    #[command(flatten)]
    pub sheet: SheetArgs,
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Descriptor string: `id-type-name-<defaults>` entries joined by `~`
    #[arg(long, env = "INPUT_STRING")]
    pub input: Option<String>,

    /// Build the descriptor string from the spreadsheet instead
    #[command(flatten)]
    pub sheet: SheetArgs,
}

#[derive(Args, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Use this descriptor string instead of the spreadsheet
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub sheet: SheetArgs,
}

#[derive(Args, Clone)]
pub struct DescriptorArgs {
    /// Table whose entity selects the rows, when --entity is not given
    #[arg(long, env = "TABLE_NAME")]
    pub table: Option<String>,

    #[command(flatten)]
    pub sheet: SheetArgs,
}
