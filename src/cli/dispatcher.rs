//! Command dispatcher
//!
//! Loads the plugin configuration and routes commands to their handlers.
//! `scan` never fails, so a broken configuration falls back to the defaults
//! there and stays fatal for `plan`.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::config::PluginConfig;
use crate::error::Result;
use crate::ui;

pub fn dispatch(args: &Cli) -> Result<()> {
    let config_path = args.global.config.as_deref();

    match &args.command {
        Command::Scan { snapshot } => {
            let config = PluginConfig::load(config_path).unwrap_or_else(|e| {
                ui::warning(&format!("{}; scanning with default settings", e));
                PluginConfig::default()
            });
            commands::scan::run(&config, commands::scan::ScanOptions {
                snapshot: snapshot.clone(),
            });
            Ok(())
        }
        Command::Plan { snapshot, json } => commands::plan::run(
            &PluginConfig::load(config_path)?,
            commands::plan::PlanOptions {
                snapshot: snapshot.clone(),
                json: *json,
            },
        ),
    }
}
