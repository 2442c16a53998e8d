//! `kmodguard scan`: diagnostic candidate scan
//!
//! Never fails: errors become warnings and the report terminator is always
//! printed, so wrappers can rely on the output shape.

use crate::config::PluginConfig;
use crate::core::planner::{ScanReport, TransactionPlanner};
use crate::error::Result;
use crate::host::{RpmHost, TransactionSnapshot};
use crate::traits::PackageHost;
use crate::ui;
use std::path::PathBuf;

pub const REPORT_TERMINATOR: &str = "---";

#[derive(Debug, Default)]
pub struct ScanOptions {
    pub snapshot: Option<PathBuf>,
}

pub fn run(config: &PluginConfig, options: ScanOptions) {
    match collect(config, &options) {
        Ok(report) => {
            for line in report.lines(config) {
                println!("{}", line);
            }
            if report.dkms_active {
                ui::note(&config.log_tag, "DKMS kmod installed, kernels are not filtered");
            }
            for pkg in &report.excluded {
                ui::verbose(&format!("excluded {}", pkg));
            }
        }
        Err(e) => ui::warning(&format!("Scan failed: {}", e)),
    }
    println!("{}", REPORT_TERMINATOR);
}

fn collect(config: &PluginConfig, options: &ScanOptions) -> Result<ScanReport> {
    let mut host: Box<dyn PackageHost> = match &options.snapshot {
        Some(path) => {
            ui::verbose(&format!("Reading snapshot {}", path.display()));
            Box::new(TransactionSnapshot::load(path)?.into_host())
        }
        None => Box::new(RpmHost::detect()?),
    };

    TransactionPlanner::new(config).diagnose(host.as_mut())
}
