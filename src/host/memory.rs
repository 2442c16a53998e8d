use crate::core::types::{ActionKind, PackageRef, PendingActions, PlannedAction};
use crate::error::Result;
use crate::traits::{NamePattern, PackageHost};

/// In-memory package database plus pending transaction.
///
/// Mutations behave like a package manager's transaction object: installs
/// land in `true-install`, erases in `erase`, both without duplicates.
/// Every mutation is also recorded so callers can inspect what was issued.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    installed: Vec<PackageRef>,
    available: Vec<PackageRef>,
    pending: PendingActions,
    excluded: Vec<PackageRef>,
    actions: Vec<PlannedAction>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed(mut self, pkgs: impl IntoIterator<Item = PackageRef>) -> Self {
        self.installed.extend(pkgs);
        self
    }

    pub fn with_available(mut self, pkgs: impl IntoIterator<Item = PackageRef>) -> Self {
        self.available.extend(pkgs);
        self
    }

    pub fn with_pending(mut self, kind: ActionKind, pkg: PackageRef) -> Self {
        self.pending.push(kind, pkg);
        self
    }

    pub fn pending(&self) -> &PendingActions {
        &self.pending
    }

    pub fn excluded(&self) -> &[PackageRef] {
        &self.excluded
    }

    /// Mutations issued so far, in order
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    fn push_unique(&mut self, kind: ActionKind, pkg: &PackageRef) {
        if !self.pending.get(kind).contains(pkg) {
            self.pending.push(kind, pkg.clone());
        }
    }
}

impl PackageHost for MemoryHost {
    fn query_installed(&self, pattern: &NamePattern) -> Result<Vec<PackageRef>> {
        Ok(self
            .installed
            .iter()
            .filter(|pkg| pattern.matches(&pkg.name))
            .cloned()
            .collect())
    }

    fn query_available(&self, pattern: &NamePattern) -> Result<Vec<PackageRef>> {
        Ok(self
            .available
            .iter()
            .filter(|pkg| pattern.matches(&pkg.name) && !self.excluded.contains(pkg))
            .cloned()
            .collect())
    }

    fn pending_actions(&self) -> Result<PendingActions> {
        Ok(self.pending.clone())
    }

    fn add_install(&mut self, pkg: &PackageRef) -> Result<()> {
        self.push_unique(ActionKind::TrueInstall, pkg);
        self.actions.push(PlannedAction::Install(pkg.clone()));
        Ok(())
    }

    fn add_erase(&mut self, pkg: &PackageRef) -> Result<()> {
        self.push_unique(ActionKind::Erase, pkg);
        self.actions.push(PlannedAction::Erase(pkg.clone()));
        Ok(())
    }

    fn deselect(&mut self, name: &str) -> Result<()> {
        for (kind, pkgs) in self.pending.members.iter_mut() {
            if kind.is_install_side() {
                pkgs.retain(|pkg| pkg.name != name);
            }
        }
        self.actions.push(PlannedAction::Deselect(name.to_string()));
        Ok(())
    }

    fn exclude_from_candidates(&mut self, pkg: &PackageRef) -> Result<()> {
        if !self.excluded.contains(pkg) {
            self.excluded.push(pkg.clone());
        }
        self.actions.push(PlannedAction::Exclude(pkg.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kmod(version: &str, release: &str) -> PackageRef {
        PackageRef::new("kmod-nvidia-latest", version, release)
    }

    #[test]
    fn test_queries_filter_by_pattern() {
        let host = MemoryHost::new()
            .with_installed([
                PackageRef::new("kernel", "5.0", "100.fc30"),
                PackageRef::new("kernel-core", "5.0", "100.fc30"),
                kmod("5.0", "100.1.fc30"),
            ])
            .with_available([kmod("5.1", "200.1.fc30")]);

        assert_eq!(host.query_installed(&NamePattern::exact("kernel")).unwrap().len(), 1);
        assert_eq!(host.query_installed(&NamePattern::prefix("kernel")).unwrap().len(), 2);
        assert_eq!(host.query_installed(&NamePattern::substring("nvidia")).unwrap().len(), 1);
        assert_eq!(host.query_available(&NamePattern::prefix("kmod-")).unwrap().len(), 1);
        assert!(host.is_installed(&kmod("5.0", "100.1.fc30")).unwrap());
        assert!(!host.is_installed(&kmod("5.1", "200.1.fc30")).unwrap());
    }

    #[test]
    fn test_deselect_only_touches_install_side() {
        let mut host = MemoryHost::new()
            .with_pending(ActionKind::Install, kmod("5.1", "200.1.fc30"))
            .with_pending(ActionKind::Update, kmod("5.1", "200.2.fc30"))
            .with_pending(ActionKind::Erase, kmod("5.0", "100.1.fc30"));

        host.deselect("kmod-nvidia-latest").unwrap();

        assert_eq!(host.pending().installing().count(), 0);
        assert_eq!(host.pending().get(ActionKind::Erase).len(), 1);
        assert_eq!(
            host.actions(),
            &[PlannedAction::Deselect("kmod-nvidia-latest".to_string())]
        );
    }

    #[test]
    fn test_repeated_mutations_do_not_duplicate_members() {
        let mut host = MemoryHost::new();
        let pkg = kmod("5.1", "200.1.fc30");

        host.add_install(&pkg).unwrap();
        host.add_install(&pkg).unwrap();
        host.add_erase(&pkg).unwrap();

        assert_eq!(host.pending().get(ActionKind::TrueInstall).len(), 1);
        assert_eq!(host.pending().get(ActionKind::Erase).len(), 1);
        assert_eq!(host.actions().len(), 3);
    }

    #[test]
    fn test_excluded_packages_leave_the_candidate_set() {
        let kernel = PackageRef::new("kernel", "5.2", "300.fc30");
        let mut host = MemoryHost::new().with_available([kernel.clone()]);

        host.exclude_from_candidates(&kernel).unwrap();

        assert!(host.query_available(&NamePattern::exact("kernel")).unwrap().is_empty());
        assert_eq!(host.excluded(), &[kernel]);
    }
}
