//! Pending transaction classification
//!
//! Reads the installed database and the pending members once per hook and
//! sorts them into the kernel, driver and kmod sets the planner works with.

use crate::config::PluginConfig;
use crate::core::editor::TransactionEditor;
use crate::core::naming;
use crate::core::types::PackageRef;
use crate::error::Result;
use crate::traits::{NamePattern, PackageHost};
use crate::ui;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub installed_kernels: Vec<PackageRef>,
    pub installing_kernels: Vec<PackageRef>,
    pub erasing_kernels: Vec<PackageRef>,

    /// First installed driver that is not leaving the system
    pub installed_driver: Option<PackageRef>,
    pub installing_driver: Option<PackageRef>,
    /// `None` when the outgoing driver is replaced by one served by the same kmods
    pub erasing_driver: Option<PackageRef>,
    /// Some driver is still installed once the transaction commits
    pub driver_remains: bool,

    pub installed_kmods: Vec<PackageRef>,
    /// kmods the solver pulled in on its own
    pub auto_selected_kmods: Vec<PackageRef>,
    pub dkms_active: bool,
}

impl Classification {
    pub fn kernels_changing(&self) -> bool {
        !self.installing_kernels.is_empty() || !self.erasing_kernels.is_empty()
    }

    /// Kernels on the system after commit: (installed - erasing) + installing
    pub fn resulting_kernels(&self) -> Vec<PackageRef> {
        let mut kernels: Vec<PackageRef> = self
            .installed_kernels
            .iter()
            .filter(|k| !self.erasing_kernels.iter().any(|e| e.same_nevra(k)))
            .cloned()
            .collect();
        for kernel in &self.installing_kernels {
            if !kernels.iter().any(|k| k.same_nevra(kernel)) {
                kernels.push(kernel.clone());
            }
        }
        kernels
    }
}

pub struct PackageSetClassifier<'a> {
    config: &'a PluginConfig,
}

impl<'a> PackageSetClassifier<'a> {
    pub fn new(config: &'a PluginConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, host: &dyn PackageHost) -> Result<Classification> {
        let config = self.config;
        let pending = host.pending_actions()?;

        let installed_kernels = host.query_installed(&NamePattern::exact(&config.kernel_name))?;
        let installed_kmod_like = host.query_installed(&NamePattern::prefix(&config.kmod_prefix))?;
        let installed_driver_like =
            host.query_installed(&NamePattern::prefix(&config.driver_basename))?;

        let dkms_active = installed_kmod_like
            .iter()
            .chain(installed_driver_like.iter())
            .any(|pkg| config.is_dkms(&pkg.name));

        let installing: Vec<&PackageRef> = pending.installing().collect();
        let erasing: Vec<&PackageRef> = pending.erasing().collect();

        let installing_kernels: Vec<PackageRef> = installing
            .iter()
            .filter(|pkg| config.is_kernel(&pkg.name))
            .map(|pkg| (*pkg).clone())
            .collect();
        let erasing_kernels: Vec<PackageRef> = erasing
            .iter()
            .filter(|pkg| config.is_kernel(&pkg.name))
            .map(|pkg| (*pkg).clone())
            .collect();

        let installing_driver = installing
            .iter()
            .find(|pkg| config.is_driver(&pkg.name))
            .map(|pkg| (*pkg).clone());

        let erasing_driver = erasing
            .iter()
            .find(|pkg| config.is_driver(&pkg.name))
            .map(|pkg| (*pkg).clone())
            .filter(|outgoing| match &installing_driver {
                Some(incoming) => !naming::same_module_set(config, outgoing, incoming),
                None => true,
            });

        let surviving_drivers: Vec<PackageRef> = installed_driver_like
            .into_iter()
            .filter(|pkg| config.is_driver(&pkg.name))
            .filter(|pkg| !erasing.iter().any(|e| e.same_nevra(pkg)))
            .collect();
        let driver_remains = installing_driver.is_some() || !surviving_drivers.is_empty();
        let installed_driver = surviving_drivers.into_iter().next();

        let installed_kmods: Vec<PackageRef> = installed_kmod_like
            .into_iter()
            .filter(|pkg| config.is_kmod(&pkg.name))
            .collect();

        // Convergence picks the kmod itself whenever kernels or drivers move,
        // so a release-only upgrade only survives an otherwise quiet transaction.
        let keeps_upgrades = installing_kernels.is_empty()
            && erasing_kernels.is_empty()
            && installing_driver.is_none()
            && erasing_driver.is_none();
        let auto_selected_kmods = installing
            .iter()
            .filter(|pkg| config.is_kmod(&pkg.name))
            .filter(|pkg| !(keeps_upgrades && self.is_accepted_upgrade(pkg, &installed_kmods)))
            .map(|pkg| (*pkg).clone())
            .collect();

        Ok(Classification {
            installed_kernels,
            installing_kernels,
            erasing_kernels,
            installed_driver,
            installing_driver,
            erasing_driver,
            driver_remains,
            installed_kmods,
            auto_selected_kmods,
            dkms_active,
        })
    }

    /// Drop every auto-selected kmod from the transaction; the planner picks
    /// the right one itself.
    pub fn deselect_auto_selected(
        &self,
        classification: &Classification,
        editor: &mut TransactionEditor<'_>,
    ) -> Result<()> {
        for kmod in &classification.auto_selected_kmods {
            editor.deselect(&kmod.name)?;
        }
        Ok(())
    }

    // A release-only upgrade of the single installed copy survives pre-resolve
    // and must not be dropped afterwards.
    fn is_accepted_upgrade(&self, candidate: &PackageRef, installed_kmods: &[PackageRef]) -> bool {
        let mut same_name = installed_kmods.iter().filter(|k| k.name == candidate.name);
        match (same_name.next(), same_name.next()) {
            (Some(installed), None) => {
                match naming::is_release_upgrade(self.config, candidate, installed) {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        ui::verbose(&format!("{}: {}", candidate, e));
                        false
                    }
                }
            }
            _ => false,
        }
    }
}
