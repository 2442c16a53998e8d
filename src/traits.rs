//! Host abstraction
//!
//! The core never touches a package database or transaction directly. Every
//! read and every mutation goes through `PackageHost`, which a plugin shim (or
//! the in-memory and rpm hosts in `crate::host`) implements. The host is
//! borrowed for one hook call and never stored.

use crate::core::types::{PackageRef, PendingActions};
use crate::error::Result;

/// Name filter for package queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    Exact(String),
    Prefix(String),
    Substring(String),
}

impl NamePattern {
    pub fn exact(name: &str) -> Self {
        Self::Exact(name.to_string())
    }

    pub fn prefix(prefix: &str) -> Self {
        Self::Prefix(prefix.to_string())
    }

    pub fn substring(needle: &str) -> Self {
        Self::Substring(needle.to_string())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => name == exact,
            Self::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Self::Substring(needle) => name.contains(needle.as_str()),
        }
    }

    /// Shell glob accepted by `rpm -qa` and `dnf repoquery`
    pub fn as_glob(&self) -> String {
        match self {
            Self::Exact(exact) => exact.clone(),
            Self::Prefix(prefix) => format!("{}*", prefix),
            Self::Substring(needle) => format!("*{}*", needle),
        }
    }
}

pub trait PackageHost {
    /// Packages in the installed database
    fn query_installed(&self, pattern: &NamePattern) -> Result<Vec<PackageRef>>;

    /// Packages the repositories offer, whether installed or not
    fn query_available(&self, pattern: &NamePattern) -> Result<Vec<PackageRef>>;

    /// Current members of the pending transaction
    fn pending_actions(&self) -> Result<PendingActions>;

    fn add_install(&mut self, pkg: &PackageRef) -> Result<()>;

    fn add_erase(&mut self, pkg: &PackageRef) -> Result<()>;

    /// Drop every install-side member named `name` from the transaction
    fn deselect(&mut self, name: &str) -> Result<()>;

    /// Hide a package from the solver's candidate set
    fn exclude_from_candidates(&mut self, pkg: &PackageRef) -> Result<()>;

    /// Whether this exact package is in the installed database
    fn is_installed(&self, pkg: &PackageRef) -> Result<bool> {
        Ok(self
            .query_installed(&NamePattern::exact(&pkg.name))?
            .iter()
            .any(|installed| installed.same_nevra(pkg)))
    }
}
