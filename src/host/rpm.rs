//! System package database host
//!
//! Reads the rpm database with `rpm -qa` and repository metadata with
//! `dnf repoquery`. There is no live transaction behind it: pending actions
//! are always empty and mutations are only recorded, which is what the
//! diagnostic scan needs.

mod query;

pub use query::parse_query_output;

use crate::core::types::{PackageRef, PendingActions, PlannedAction};
use crate::error::{KmodError, Result};
use crate::traits::{NamePattern, PackageHost};
use crate::ui;
use query::PackageQuery;
use std::time::Duration;

const RPM_QUERY_FORMAT: &str = "%{NAME}\t%{EPOCHNUM}\t%{VERSION}\t%{RELEASE}\t%{ARCH}\n";
const DNF_QUERY_FORMAT: &str = "%{name}\t%{epoch}\t%{version}\t%{release}\t%{arch}\n";
const QUERY_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Default)]
pub struct RpmHost {
    has_dnf: bool,
    recorded: Vec<PlannedAction>,
}

impl RpmHost {
    /// Requires `rpm`; repository queries are skipped when `dnf` is missing.
    pub fn detect() -> Result<Self> {
        if which::which("rpm").is_err() {
            return Err(KmodError::HostError(
                "rpm not found in PATH; use --snapshot on non-RPM systems".to_string(),
            ));
        }

        let has_dnf = which::which("dnf").is_ok();
        if !has_dnf {
            ui::warning("dnf not found in PATH; available packages will not be listed");
        }

        Ok(Self {
            has_dnf,
            recorded: Vec::new(),
        })
    }

    /// Mutations requested during the run; nothing reaches the system
    pub fn recorded(&self) -> &[PlannedAction] {
        &self.recorded
    }
}

impl PackageHost for RpmHost {
    fn query_installed(&self, pattern: &NamePattern) -> Result<Vec<PackageRef>> {
        PackageQuery::new("rpm", QUERY_TIMEOUT)
            .arg("-qa")
            .arg("--queryformat")
            .arg(RPM_QUERY_FORMAT)
            .run(pattern)
    }

    fn query_available(&self, pattern: &NamePattern) -> Result<Vec<PackageRef>> {
        if !self.has_dnf {
            return Ok(Vec::new());
        }

        PackageQuery::new("dnf", QUERY_TIMEOUT)
            .arg("repoquery")
            .arg("--quiet")
            .arg("--available")
            .arg("--queryformat")
            .arg(DNF_QUERY_FORMAT)
            .run(pattern)
    }

    fn pending_actions(&self) -> Result<PendingActions> {
        Ok(PendingActions::default())
    }

    fn add_install(&mut self, pkg: &PackageRef) -> Result<()> {
        self.recorded.push(PlannedAction::Install(pkg.clone()));
        Ok(())
    }

    fn add_erase(&mut self, pkg: &PackageRef) -> Result<()> {
        self.recorded.push(PlannedAction::Erase(pkg.clone()));
        Ok(())
    }

    fn deselect(&mut self, name: &str) -> Result<()> {
        self.recorded.push(PlannedAction::Deselect(name.to_string()));
        Ok(())
    }

    fn exclude_from_candidates(&mut self, pkg: &PackageRef) -> Result<()> {
        self.recorded.push(PlannedAction::Exclude(pkg.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutations_are_only_recorded() {
        let mut host = RpmHost::default();
        let kernel = PackageRef::new("kernel", "5.1", "200.fc30");

        host.exclude_from_candidates(&kernel).unwrap();
        host.deselect("kmod-nvidia-latest").unwrap();

        assert_eq!(
            host.recorded(),
            &[
                PlannedAction::Exclude(kernel),
                PlannedAction::Deselect("kmod-nvidia-latest".to_string()),
            ]
        );
        assert!(host.pending_actions().unwrap().is_empty());
    }
}
