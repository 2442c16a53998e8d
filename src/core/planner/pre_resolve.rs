use super::TransactionPlanner;
use crate::core::classifier::PackageSetClassifier;
use crate::core::editor::TransactionEditor;
use crate::core::naming;
use crate::core::types::{PackageRef, PlannedAction};
use crate::error::{KmodError, Result};
use crate::traits::{NamePattern, PackageHost};
use crate::ui;

impl TransactionPlanner<'_> {
    /// Deselect every directly selected kmod that is not a release-only
    /// upgrade of the installed kmod with the same name.
    pub fn on_pre_resolve(&self, host: &mut dyn PackageHost) -> Result<Vec<PlannedAction>> {
        let config = self.config;
        let classification = PackageSetClassifier::new(config).classify(host)?;
        if classification.dkms_active {
            ui::verbose("DKMS kmod installed, leaving the transaction alone");
            return Ok(Vec::new());
        }

        let pending = host.pending_actions()?;
        let selected: Vec<PackageRef> = pending
            .installing()
            .filter(|pkg| config.is_kmod(&pkg.name))
            .cloned()
            .collect();
        if selected.is_empty() {
            return Ok(Vec::new());
        }

        let mut editor = TransactionEditor::new(host);
        for candidate in &selected {
            let installed = editor
                .host()
                .query_installed(&NamePattern::exact(&candidate.name))?;

            let accepted = match installed.as_slice() {
                [] => false,
                [current] => match naming::is_release_upgrade(config, candidate, current) {
                    Ok(accepted) => accepted,
                    Err(e) if e.is_recoverable() => {
                        ui::plugin_warning(&config.log_tag, &format!("{}: {}", candidate, e));
                        false
                    }
                    Err(e) => return Err(e),
                },
                many => {
                    return Err(KmodError::AmbiguousMultipleMatch {
                        what: format!("installed {}", candidate.name),
                        count: many.len(),
                    });
                }
            };

            if accepted {
                ui::verbose(&format!("{} is a release-only upgrade", candidate));
            } else {
                editor.deselect(&candidate.name)?;
            }
        }

        Ok(editor.finish())
    }
}
