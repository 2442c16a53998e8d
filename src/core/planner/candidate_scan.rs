use super::TransactionPlanner;
use crate::config::PluginConfig;
use crate::core::classifier::PackageSetClassifier;
use crate::core::editor::TransactionEditor;
use crate::core::naming;
use crate::core::resolver::{KmodResolver, Resolution};
use crate::core::types::{PackageRef, PlannedAction};
use crate::error::Result;
use crate::traits::{NamePattern, PackageHost};
use crate::ui;
use serde::Serialize;

/// What the candidate scan saw and did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub installed_kernel: Option<PackageRef>,
    pub installed_kmods: Vec<PackageRef>,
    pub available_kernels: Vec<PackageRef>,
    pub available_kernel_cores: Vec<PackageRef>,
    pub available_drivers: Vec<PackageRef>,
    pub available_kmods: Vec<PackageRef>,
    pub dkms_active: bool,
    pub excluded: Vec<PackageRef>,
    pub actions: Vec<PlannedAction>,
}

impl ScanReport {
    /// Report lines in `label: pkg pkg ...` form
    pub fn lines(&self, config: &PluginConfig) -> Vec<String> {
        vec![
            format!(
                "installed kernel: {}",
                self.installed_kernel
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "none".to_string())
            ),
            labelled("installed kmod(s)", &self.installed_kmods),
            labelled(&format!("available {}(s)", config.kernel_name), &self.available_kernels),
            labelled(
                &format!("available {}(s)", config.kernel_core_name),
                &self.available_kernel_cores,
            ),
            labelled("available driver(s)", &self.available_drivers),
            labelled("available kmod(s)", &self.available_kmods),
        ]
    }
}

fn labelled(label: &str, pkgs: &[PackageRef]) -> String {
    if pkgs.is_empty() {
        return format!("{}: none", label);
    }
    let joined = pkgs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}: {}", label, joined)
}

impl TransactionPlanner<'_> {
    /// Exclude every available kernel newer than the newest installed one for
    /// which no kmod of the installed driver stream exists.
    pub fn on_candidate_scan(&self, host: &mut dyn PackageHost) -> Result<Vec<PlannedAction>> {
        Ok(self.scan(host, false)?.actions)
    }

    /// Candidate scan that always collects the full report, even when the
    /// plugin itself would stop early (no driver, no kernel, DKMS).
    pub fn diagnose(&self, host: &mut dyn PackageHost) -> Result<ScanReport> {
        self.scan(host, true)
    }

    fn scan(&self, host: &mut dyn PackageHost, diagnostic: bool) -> Result<ScanReport> {
        let config = self.config;
        let classification = PackageSetClassifier::new(config).classify(host)?;

        if !diagnostic
            && (classification.dkms_active
                || classification.installed_driver.is_none()
                || classification.installed_kernels.is_empty())
        {
            return Ok(ScanReport::default());
        }

        let installed_kernel = classification
            .installed_kernels
            .iter()
            .max_by(|a, b| a.evr().cmp(&b.evr()))
            .cloned();

        let available_kernels = host.query_available(&NamePattern::exact(&config.kernel_name))?;
        let available_kernel_cores =
            host.query_available(&NamePattern::exact(&config.kernel_core_name))?;
        let available_drivers: Vec<PackageRef> = host
            .query_available(&NamePattern::prefix(&config.driver_basename))?
            .into_iter()
            .filter(|pkg| config.is_driver(&pkg.name))
            .collect();
        let available_kmods: Vec<PackageRef> = host
            .query_available(&NamePattern::prefix(&config.kmod_prefix))?
            .into_iter()
            .filter(|pkg| config.is_kmod(&pkg.name))
            .collect();

        let mut report = ScanReport {
            installed_kernel,
            installed_kmods: classification.installed_kmods.clone(),
            available_kernels,
            available_kernel_cores,
            available_drivers,
            available_kmods,
            dkms_active: classification.dkms_active,
            ..ScanReport::default()
        };

        if classification.dkms_active {
            return Ok(report);
        }
        let (Some(driver), Some(newest_installed)) = (
            classification.installed_driver.clone(),
            report.installed_kernel.clone(),
        ) else {
            return Ok(report);
        };

        // Any version of the installed stream may end up installed alongside
        // the new kernel.
        let mut stream_drivers: Vec<PackageRef> = report
            .available_drivers
            .iter()
            .filter(|d| d.name == driver.name)
            .cloned()
            .collect();
        if !stream_drivers.iter().any(|d| d.same_nevra(&driver)) {
            stream_drivers.push(driver.clone());
        }

        let resolver = KmodResolver::new(config);
        let mut editor = TransactionEditor::new(host);

        for kernel in &report.available_kernels {
            if kernel.evr() <= newest_installed.evr() {
                continue;
            }

            let supported = stream_drivers.iter().any(|d| {
                matches!(
                    resolver.resolve(d, kernel, &report.available_kmods),
                    Resolution::Found(_)
                )
            });
            if supported {
                continue;
            }

            let core = report
                .available_kernel_cores
                .iter()
                .find(|c| c.version == kernel.version && c.release == kernel.release);
            if core.is_none() {
                ui::plugin_warning(
                    &config.log_tag,
                    &format!("Unable to find matching {} package", config.kernel_core_name),
                );
            }

            let excluded = match (editor.exclude(kernel), core) {
                (Ok(()), Some(core)) => editor.exclude(core),
                (result, _) => result,
            };
            if let Err(e) = excluded {
                ui::plugin_warning(&config.log_tag, &format!("kernel exclude error: {}", e));
                continue;
            }

            report.excluded.push(kernel.clone());
            report.excluded.extend(core.cloned());

            let kmod_name = naming::kmod_name_for(config, &driver, kernel)
                .unwrap_or_else(|_| config.kmod_prefix.clone());
            ui::note(
                &config.log_tag,
                &format!(
                    "NOTE: Skipping kernel installation since no kernel module package {} \
                     for kernel version {} and {} driver {} could be found",
                    kmod_name,
                    kernel.version_release(),
                    config.log_tag,
                    driver.version
                ),
            );
        }

        report.actions = editor.finish();
        Ok(report)
    }
}
