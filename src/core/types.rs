use crate::core::version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

// One concrete package variant as reported by the host.
// Equality and hashing are exact (all five fields); ordering by version goes through `Evr`.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    #[serde(default)]
    pub epoch: u32,
    pub version: String,
    pub release: String,
    #[serde(default)]
    pub arch: String,
}

impl PackageRef {
    pub fn new(name: &str, version: &str, release: &str) -> Self {
        Self {
            name: name.to_string(),
            epoch: 0,
            version: version.to_string(),
            release: release.to_string(),
            arch: String::new(),
        }
    }

    pub fn with_arch(mut self, arch: &str) -> Self {
        self.arch = arch.to_string();
        self
    }

    pub fn with_epoch(mut self, epoch: u32) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn evr(&self) -> Evr {
        Evr {
            epoch: self.epoch,
            version: self.version.clone(),
            release: self.release.clone(),
        }
    }

    /// `version-release`, the form used in user-facing kernel messages
    pub fn version_release(&self) -> String {
        format!("{}-{}", self.version, self.release)
    }

    /// Same name, EVR and (when both sides carry one) arch.
    pub fn same_nevra(&self, other: &PackageRef) -> bool {
        self.name == other.name
            && self.epoch == other.epoch
            && self.version == other.version
            && self.release == other.release
            && (self.arch.is_empty() || other.arch.is_empty() || self.arch == other.arch)
    }
}

// NEVRA, epoch omitted when 0
impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-", self.name)?;
        if self.epoch != 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}-{}", self.version, self.release)?;
        if !self.arch.is_empty() {
            write!(f, ".{}", self.arch)?;
        }
        Ok(())
    }
}

/// Epoch/version/release triple with RPM ordering.
///
/// `PartialEq` follows the ordering, so `1.0` and `1.00` compare equal.
#[derive(Debug, Clone, Default)]
pub struct Evr {
    pub epoch: u32,
    pub version: String,
    pub release: String,
}

impl Evr {
    pub fn new(version: &str, release: &str) -> Self {
        Self {
            epoch: 0,
            version: version.to_string(),
            release: release.to_string(),
        }
    }
}

impl Ord for Evr {
    fn cmp(&self, other: &Self) -> Ordering {
        version::compare_evr(self, other)
    }
}

impl PartialOrd for Evr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evr {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Evr {}

impl fmt::Display for Evr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}-{}", self.version, self.release)
    }
}

/// Pending transaction member states, as the host reports them
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Install,
    TrueInstall,
    Update,
    /// The outgoing version of an update
    Updated,
    Erase,
}

impl ActionKind {
    pub fn is_install_side(self) -> bool {
        matches!(self, Self::Install | Self::TrueInstall | Self::Update)
    }

    pub fn is_erase_side(self) -> bool {
        matches!(self, Self::Erase | Self::Updated)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::TrueInstall => write!(f, "true-install"),
            Self::Update => write!(f, "update"),
            Self::Updated => write!(f, "updated"),
            Self::Erase => write!(f, "erase"),
        }
    }
}

/// Snapshot of the host's pending transaction members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingActions {
    pub members: BTreeMap<ActionKind, Vec<PackageRef>>,
}

impl PendingActions {
    pub fn push(&mut self, kind: ActionKind, pkg: PackageRef) {
        self.members.entry(kind).or_default().push(pkg);
    }

    pub fn get(&self, kind: ActionKind) -> &[PackageRef] {
        self.members.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Members entering the system (install, true-install, update)
    pub fn installing(&self) -> impl Iterator<Item = &PackageRef> {
        self.members
            .iter()
            .filter(|(kind, _)| kind.is_install_side())
            .flat_map(|(_, pkgs)| pkgs.iter())
    }

    /// Members leaving the system (erase, updated)
    pub fn erasing(&self) -> impl Iterator<Item = &PackageRef> {
        self.members
            .iter()
            .filter(|(kind, _)| kind.is_erase_side())
            .flat_map(|(_, pkgs)| pkgs.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.members.values().all(Vec::is_empty)
    }
}

/// A mutation issued against the host transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "target", rename_all = "kebab-case")]
pub enum PlannedAction {
    Install(PackageRef),
    Erase(PackageRef),
    Deselect(String),
    Exclude(PackageRef),
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install(pkg) => write!(f, "install {}", pkg),
            Self::Erase(pkg) => write!(f, "erase {}", pkg),
            Self::Deselect(name) => write!(f, "deselect {}", name),
            Self::Exclude(pkg) => write!(f, "exclude {}", pkg),
        }
    }
}
