//! JSON transaction snapshots
//!
//! A snapshot captures what a host would report during one transaction:
//! installed packages, repository packages and pending members.

use crate::core::types::{PackageRef, PendingActions};
use crate::error::{KmodError, Result};
use crate::host::MemoryHost;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSnapshot {
    #[serde(default)]
    pub installed: Vec<PackageRef>,
    #[serde(default)]
    pub available: Vec<PackageRef>,
    #[serde(default)]
    pub pending: PendingActions,
}

impl TransactionSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| KmodError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn into_host(self) -> MemoryHost {
        let mut host = MemoryHost::new()
            .with_installed(self.installed)
            .with_available(self.available);
        for (kind, pkgs) in self.pending.members {
            for pkg in pkgs {
                host = host.with_pending(kind, pkg);
            }
        }
        host
    }
}
