use super::TransactionPlanner;
use crate::core::classifier::{Classification, PackageSetClassifier};
use crate::core::editor::TransactionEditor;
use crate::core::naming;
use crate::core::resolver::{KmodResolver, Resolution};
use crate::core::types::{PackageRef, PlannedAction};
use crate::error::Result;
use crate::traits::PackageHost;
use crate::ui;

impl TransactionPlanner<'_> {
    /// Converge the kmod set after the solver has finished.
    ///
    /// Auto-selected kmods are dropped first. Then, in order: an incoming
    /// driver gets the kmod for the newest resulting kernel, an outgoing driver
    /// takes its kmods along, and kernel changes under an installed driver
    /// trigger the same convergence as a driver install.
    pub fn on_post_resolve(&self, host: &mut dyn PackageHost) -> Result<Vec<PlannedAction>> {
        let classifier = PackageSetClassifier::new(self.config);
        let classification = classifier.classify(host)?;
        if classification.dkms_active {
            ui::verbose("DKMS kmod installed, leaving the transaction alone");
            return Ok(Vec::new());
        }

        let mut editor = TransactionEditor::new(host);
        classifier.deselect_auto_selected(&classification, &mut editor)?;

        if let Some(driver) = &classification.installing_driver {
            ui::verbose(&format!("driver {} is being installed", driver));
            self.converge(driver, &classification, &mut editor)?;
        }

        if let Some(driver) = &classification.erasing_driver {
            ui::verbose(&format!("driver {} is being erased", driver));
            self.erase_driver_modules(driver, &classification, &mut editor)?;
        }

        if classification.installing_driver.is_none()
            && classification.kernels_changing()
            && let Some(driver) = &classification.installed_driver
        {
            self.converge(driver, &classification, &mut editor)?;
        }

        Ok(editor.finish())
    }

    // Install the kmod for the newest resulting kernel and erase the installed
    // kmods of the driver it replaces.
    fn converge(
        &self,
        driver: &PackageRef,
        classification: &Classification,
        editor: &mut TransactionEditor<'_>,
    ) -> Result<()> {
        let Some(newest) = classification
            .resulting_kernels()
            .into_iter()
            .max_by(|a, b| a.evr().cmp(&b.evr()))
        else {
            ui::verbose("no kernel left after this transaction");
            return Ok(());
        };

        let resolver = KmodResolver::new(self.config);
        let module = match resolver.locate_module(editor.host(), driver, &newest) {
            Ok(module) => module,
            Err(e) if e.is_recoverable() => {
                ui::note(&self.config.log_tag, &e.to_string());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        // A kernel removal on its own only retires the modules serving the
        // removed kernels; modules of surviving older kernels stay.
        let replaced: Vec<PackageRef> = if classification.installing_kernels.is_empty()
            && classification.installing_driver.is_none()
        {
            classification
                .erasing_kernels
                .iter()
                .filter_map(
                    |kernel| match resolver.resolve(driver, kernel, &classification.installed_kmods) {
                        Resolution::Found(kmod) => Some(kmod),
                        Resolution::NotFound => None,
                    },
                )
                .collect()
        } else {
            classification.installed_kmods.clone()
        };

        for kmod in &replaced {
            if naming::belongs_to(self.config, kmod, driver) && !kmod.same_nevra(&module.pkg) {
                editor.erase(kmod)?;
            }
        }

        if !module.installed {
            editor.install(&module.pkg)?;
        }
        Ok(())
    }

    fn erase_driver_modules(
        &self,
        driver: &PackageRef,
        classification: &Classification,
        editor: &mut TransactionEditor<'_>,
    ) -> Result<()> {
        for kmod in &classification.installed_kmods {
            if !classification.driver_remains || naming::belongs_to(self.config, kmod, driver) {
                editor.erase(kmod)?;
            }
        }
        Ok(())
    }
}
