//! extrafield-cli: reconcile `tblextrafields` metadata with the values found
//! in the custom-data tables and write the SQL that brings them in line.

mod cli;
mod config;
mod descriptor;
mod entity;
mod output;
mod reconcile;
mod source;
mod sql;
mod sync;
mod workbook;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so clap's env fallbacks see its values
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Output directory: {}", config.output.dir.display());

    cli::commands::dispatch(cli, config).await
}
