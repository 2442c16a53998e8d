//! Transaction hooks
//!
//! The host calls one hook per lifecycle point:
//! - `on_candidate_scan` before solving, to hide kernels no kmod supports
//! - `on_pre_resolve` to refuse kmod upgrades that jump kernel targets
//! - `on_post_resolve` to install and erase kmods so the final package set
//!   holds exactly one module for the newest kernel
//!
//! Each hook reads fresh state from the host and keeps nothing between calls.

mod candidate_scan;
mod post_resolve;
mod pre_resolve;

use crate::config::PluginConfig;
use crate::core::types::PlannedAction;
use crate::error::Result;
use crate::traits::PackageHost;
use serde::Serialize;

pub use candidate_scan::ScanReport;

/// Actions issued by a full pre + post resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub pre_resolve: Vec<PlannedAction>,
    pub post_resolve: Vec<PlannedAction>,
}

impl PlanReport {
    pub fn is_empty(&self) -> bool {
        self.pre_resolve.is_empty() && self.post_resolve.is_empty()
    }

    pub fn actions(&self) -> impl Iterator<Item = &PlannedAction> {
        self.pre_resolve.iter().chain(self.post_resolve.iter())
    }
}

pub struct TransactionPlanner<'a> {
    config: &'a PluginConfig,
}

impl<'a> TransactionPlanner<'a> {
    pub fn new(config: &'a PluginConfig) -> Self {
        Self { config }
    }

    /// Run pre-resolution then post-resolution against the same host
    pub fn run_transaction(&self, host: &mut dyn PackageHost) -> Result<PlanReport> {
        let pre_resolve = self.on_pre_resolve(host)?;
        let post_resolve = self.on_post_resolve(host)?;
        Ok(PlanReport {
            pre_resolve,
            post_resolve,
        })
    }
}
