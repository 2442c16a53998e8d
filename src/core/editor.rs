//! Guarded transaction mutations for one hook run

use crate::core::types::{PackageRef, PlannedAction};
use crate::error::{KmodError, Result};
use crate::traits::PackageHost;
use crate::ui;

/// Wraps the host for the duration of one hook call.
///
/// Drops repeated actions, refuses to erase packages that are not installed
/// or to install packages that already are, and keeps the list of actions it
/// issued.
pub struct TransactionEditor<'h> {
    host: &'h mut dyn PackageHost,
    issued: Vec<PlannedAction>,
}

impl<'h> TransactionEditor<'h> {
    pub fn new(host: &'h mut dyn PackageHost) -> Self {
        Self {
            host,
            issued: Vec::new(),
        }
    }

    pub fn host(&self) -> &dyn PackageHost {
        &*self.host
    }

    pub fn install(&mut self, pkg: &PackageRef) -> Result<()> {
        let action = PlannedAction::Install(pkg.clone());
        if self.issued.contains(&action) {
            return Ok(());
        }
        if self.host.is_installed(pkg)? {
            return Err(KmodError::InvariantViolation(format!(
                "tried installing already installed package {}",
                pkg
            )));
        }

        ui::verbose(&format!("install {}", pkg));
        self.host.add_install(pkg)?;
        self.issued.push(action);
        Ok(())
    }

    pub fn erase(&mut self, pkg: &PackageRef) -> Result<()> {
        let action = PlannedAction::Erase(pkg.clone());
        if self.issued.contains(&action) {
            return Ok(());
        }
        if !self.host.is_installed(pkg)? {
            return Err(KmodError::InvariantViolation(format!(
                "tried erasing non-installed package {}",
                pkg
            )));
        }
        if self.host.pending_actions()?.erasing().any(|p| p.same_nevra(pkg)) {
            return Ok(());
        }

        ui::verbose(&format!("erase {}", pkg));
        self.host.add_erase(pkg)?;
        self.issued.push(action);
        Ok(())
    }

    pub fn deselect(&mut self, name: &str) -> Result<()> {
        let action = PlannedAction::Deselect(name.to_string());
        if self.issued.contains(&action) {
            return Ok(());
        }

        ui::verbose(&format!("deselect {}", name));
        self.host.deselect(name)?;
        self.issued.push(action);
        Ok(())
    }

    pub fn exclude(&mut self, pkg: &PackageRef) -> Result<()> {
        let action = PlannedAction::Exclude(pkg.clone());
        if self.issued.contains(&action) {
            return Ok(());
        }

        self.host.exclude_from_candidates(pkg)?;
        self.issued.push(action);
        Ok(())
    }

    pub fn finish(self) -> Vec<PlannedAction> {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ActionKind;
    use crate::host::MemoryHost;

    fn kmod(version: &str, release: &str) -> PackageRef {
        PackageRef::new("kmod-nvidia-latest", version, release)
    }

    #[test]
    fn test_erasing_non_installed_package_is_fatal() {
        let mut host = MemoryHost::new();
        let mut editor = TransactionEditor::new(&mut host);

        let err = editor.erase(&kmod("5.0", "100.1.fc30")).unwrap_err();
        assert!(matches!(err, KmodError::InvariantViolation(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_installing_installed_package_is_fatal() {
        let installed = kmod("5.0", "100.1.fc30");
        let mut host = MemoryHost::new().with_installed([installed.clone()]);
        let mut editor = TransactionEditor::new(&mut host);

        assert!(matches!(
            editor.install(&installed),
            Err(KmodError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_repeated_actions_are_issued_once() {
        let installed = kmod("5.0", "100.1.fc30");
        let incoming = kmod("5.1", "200.1.fc30");
        let mut host = MemoryHost::new().with_installed([installed.clone()]);

        let issued = {
            let mut editor = TransactionEditor::new(&mut host);
            editor.erase(&installed).unwrap();
            editor.erase(&installed).unwrap();
            editor.install(&incoming).unwrap();
            editor.install(&incoming).unwrap();
            editor.finish()
        };

        assert_eq!(
            issued,
            vec![PlannedAction::Erase(installed), PlannedAction::Install(incoming)]
        );
        assert_eq!(host.actions().len(), 2);
    }

    #[test]
    fn test_erase_already_pending_is_skipped() {
        let installed = kmod("5.0", "100.1.fc30");
        let mut host = MemoryHost::new()
            .with_installed([installed.clone()])
            .with_pending(ActionKind::Erase, installed.clone());

        let issued = {
            let mut editor = TransactionEditor::new(&mut host);
            editor.erase(&installed).unwrap();
            editor.finish()
        };

        assert!(issued.is_empty());
        assert!(host.actions().is_empty());
    }
}
