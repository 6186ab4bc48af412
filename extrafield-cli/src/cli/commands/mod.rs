//! Command handlers

pub mod sync;
pub mod workbook;

use anyhow::Result;

use super::{Cli, Commands};
use crate::config::Config;

/// Dispatch the parsed command line
pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => sync::handle_run(args, &config).await,
        Some(Commands::Generate(args)) => sync::handle_generate(args, &config).await,
        Some(Commands::Update(args)) => sync::handle_update(args, &config).await,
        Some(Commands::Descriptor(args)) => workbook::handle_descriptor(args),
        Some(Commands::Template { path }) => workbook::handle_template(&path),
        None => sync::handle_run(cli.run, &config).await,
    }
}
