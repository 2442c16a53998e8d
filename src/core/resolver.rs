//! Kernel module resolution
//!
//! Every kmod is valid for the kernel it was built against and for later
//! kernels that keep the driver ABI. That compatibility is not recorded
//! anywhere, so it is approximated: the right module for a kernel is the one
//! whose target kernel is the greatest one still `<=` that kernel.

use crate::config::PluginConfig;
use crate::core::naming;
use crate::core::release;
use crate::core::types::{Evr, PackageRef};
use crate::error::{KmodError, Result};
use crate::traits::{NamePattern, PackageHost};
use crate::ui;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(PackageRef),
    NotFound,
}

/// A resolved kmod, tagged with whether the installed database holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePackage {
    pub pkg: PackageRef,
    pub installed: bool,
}

pub struct KmodResolver<'a> {
    config: &'a PluginConfig,
}

impl<'a> KmodResolver<'a> {
    pub fn new(config: &'a PluginConfig) -> Self {
        Self { config }
    }

    /// Pick the kmod for `driver` and `kernel` among `candidates`.
    ///
    /// Greatest target kernel `<=` the kernel wins; equal targets fall back to
    /// the greatest full kmod EVR (the newest rebuild). Candidates whose target
    /// cannot be read are skipped with a warning.
    pub fn resolve(
        &self,
        driver: &PackageRef,
        kernel: &PackageRef,
        candidates: &[PackageRef],
    ) -> Resolution {
        let kernel_evr = Evr::new(&kernel.version, &kernel.release);
        let mut best: Option<(Evr, &PackageRef)> = None;

        for kmod in candidates {
            if !naming::belongs_to(self.config, kmod, driver) || !arch_compatible(kmod, driver) {
                continue;
            }

            let target = match naming::kmod_target(self.config, kmod) {
                Ok(target) => target,
                Err(e) => {
                    ui::plugin_warning(&self.config.log_tag, &format!("Skipping {}: {}", kmod, e));
                    continue;
                }
            };

            if target > kernel_evr {
                continue;
            }

            let better = match &best {
                None => true,
                Some((best_target, best_kmod)) => match target.cmp(best_target) {
                    Ordering::Greater => true,
                    Ordering::Equal => kmod.evr() > best_kmod.evr(),
                    Ordering::Less => false,
                },
            };
            if better {
                best = Some((target, kmod));
            }
        }

        match best {
            Some((target, kmod)) => {
                if release::pairs_with(&target, kernel).unwrap_or(false) {
                    ui::verbose(&format!("{} is an exact build for kernel {}", kmod, kernel));
                } else {
                    ui::verbose(&format!(
                        "{} (built for {}) reused for kernel {}",
                        kmod, target, kernel
                    ));
                }
                Resolution::Found(kmod.clone())
            }
            None => Resolution::NotFound,
        }
    }

    /// Resolve against installed and available kmods and return the concrete
    /// package, preferring the installed database copy.
    ///
    /// A miss is `NoCompatibleModule`; more than one installed copy of the
    /// chosen package is `AmbiguousMultipleMatch`.
    pub fn locate_module(
        &self,
        host: &dyn PackageHost,
        driver: &PackageRef,
        kernel: &PackageRef,
    ) -> Result<ModulePackage> {
        let pattern = NamePattern::prefix(&self.config.kmod_prefix);
        let installed = host.query_installed(&pattern)?;
        let mut candidates = installed.clone();
        candidates.extend(host.query_available(&pattern)?);

        let chosen = match self.resolve(driver, kernel, &candidates) {
            Resolution::Found(chosen) => chosen,
            Resolution::NotFound => {
                return Err(KmodError::NoCompatibleModule {
                    kmod: naming::kmod_name_for(self.config, driver, kernel)
                        .unwrap_or_else(|_| self.config.kmod_prefix.clone()),
                    kernel: kernel.version_release(),
                    driver: driver.to_string(),
                });
            }
        };

        let matches: Vec<&PackageRef> = installed
            .iter()
            .filter(|pkg| pkg.same_nevra(&chosen))
            .collect();

        match matches.as_slice() {
            [] => Ok(ModulePackage {
                pkg: chosen,
                installed: false,
            }),
            [only] => Ok(ModulePackage {
                pkg: (*only).clone(),
                installed: true,
            }),
            many => Err(KmodError::AmbiguousMultipleMatch {
                what: format!("installed {}", chosen),
                count: many.len(),
            }),
        }
    }
}

fn arch_compatible(kmod: &PackageRef, driver: &PackageRef) -> bool {
    kmod.arch.is_empty() || driver.arch.is_empty() || kmod.arch == driver.arch
}
