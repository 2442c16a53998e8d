//! `kmodguard plan`: run the resolve hooks against a snapshot

use crate::config::PluginConfig;
use crate::core::planner::{PlanReport, TransactionPlanner};
use crate::error::Result;
use crate::host::TransactionSnapshot;
use crate::ui;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug)]
pub struct PlanOptions {
    pub snapshot: PathBuf,
    pub json: bool,
}

pub fn run(config: &PluginConfig, options: PlanOptions) -> Result<()> {
    let mut host = TransactionSnapshot::load(&options.snapshot)?.into_host();
    let report = TransactionPlanner::new(config).run_transaction(&mut host)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &PlanReport) {
    if report.is_empty() {
        ui::success("Transaction already consistent, nothing to change");
        return;
    }

    for (stage, actions) in [
        ("pre-resolve", &report.pre_resolve),
        ("post-resolve", &report.post_resolve),
    ] {
        if actions.is_empty() {
            continue;
        }
        ui::header(stage);
        for action in actions {
            println!("  {} {}", "→".cyan(), action);
        }
    }
}
