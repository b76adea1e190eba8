//! rTimeline library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind it (event store, import/export adapters, persistence).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod import;
pub mod models;
pub mod persist;
pub mod ui;
pub mod utils;

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde_str;
use clap::Parser;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        cmd => {
            let ws = Workspace::open(cfg)?;
            match cmd {
                Commands::Add { .. } => cli::commands::add::handle(cmd, &ws),
                Commands::Edit { .. } => cli::commands::edit::handle(cmd, &ws),
                Commands::Del { .. } => cli::commands::del::handle(cmd, &ws),
                Commands::List { .. } => cli::commands::list::handle(cmd, &ws),
                Commands::Import { .. } => cli::commands::import::handle(cmd, &ws),
                Commands::Export { .. } => cli::commands::export::handle(cmd, &ws),
                Commands::Settings { .. } => cli::commands::settings::handle(cmd, &ws),
                Commands::Storage { .. } => cli::commands::storage::handle(cmd, &ws),
                Commands::Savepoint { .. } => cli::commands::savepoint::handle(cmd, &ws),
                Commands::Log { .. } => cli::commands::log::handle(cmd, &ws),
                Commands::Init | Commands::Config { .. } => Ok(()),
            }
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = expand_tilde_str(custom_db);
    }
    if let Some(dir) = &cli.save_dir {
        cfg.save_points_dir = expand_tilde_str(dir);
    }

    dispatch(&cli, &cfg)
}
