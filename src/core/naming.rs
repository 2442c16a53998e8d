//! Mapping between driver, kernel and kmod package names
//!
//! Stream naming (`kmod-nvidia-latest`) keeps one package name per driver
//! stream and encodes the target kernel in version/release. Versioned naming
//! (`kmod-nvidia-460.32.03-4.18.0-240`) encodes driver and kernel in the name.

use crate::config::{KmodNaming, PluginConfig};
use crate::core::release;
use crate::core::types::{Evr, PackageRef};
use crate::error::{KmodError, Result};

/// Name of the kmod package built for `driver` and `kernel`.
pub fn kmod_name_for(
    config: &PluginConfig,
    driver: &PackageRef,
    kernel: &PackageRef,
) -> Result<String> {
    match config.naming {
        KmodNaming::Stream => Ok(stream_kmod_name(config, driver)),
        KmodNaming::Versioned => Ok(format!(
            "{}-{}-{}-{}",
            config.kmod_prefix,
            driver.version,
            kernel.version,
            release::without_dist(&kernel.release)?
        )),
    }
}

/// Whether `kmod` is one of the module packages shipped for `driver`.
pub fn belongs_to(config: &PluginConfig, kmod: &PackageRef, driver: &PackageRef) -> bool {
    if !config.is_kmod(&kmod.name) {
        return false;
    }
    match config.naming {
        KmodNaming::Stream => kmod.name == stream_kmod_name(config, driver),
        KmodNaming::Versioned => {
            kmod.version == driver.version
                && kmod.name.starts_with(&versioned_prefix(config, driver))
        }
    }
}

/// Kernel (version, release without dist) a kmod package was built against.
pub fn kmod_target(config: &PluginConfig, kmod: &PackageRef) -> Result<Evr> {
    match config.naming {
        KmodNaming::Stream => Ok(Evr::new(
            &kmod.version,
            release::kmod_kernel_release(&kmod.release)?,
        )),
        KmodNaming::Versioned => {
            let prefix = format!("{}-{}-", config.kmod_prefix, kmod.version);
            let malformed = || KmodError::MalformedKmodName {
                name: kmod.name.clone(),
                expected: format!("{}<kernel version>-<kernel release>", prefix),
            };
            let tail = kmod.name.strip_prefix(&prefix).ok_or_else(malformed)?;
            match tail.split_once('-') {
                Some((version, rel)) if !version.is_empty() && !rel.is_empty() => {
                    Ok(Evr::new(version, rel))
                }
                _ => Err(malformed()),
            }
        }
    }
}

/// Whether two drivers are served by the same kmod packages, so replacing one
/// with the other leaves the installed modules valid.
pub fn same_module_set(config: &PluginConfig, a: &PackageRef, b: &PackageRef) -> bool {
    match config.naming {
        KmodNaming::Stream => stream_kmod_name(config, a) == stream_kmod_name(config, b),
        KmodNaming::Versioned => a.version == b.version,
    }
}

/// Whether `candidate` only bumps the module release of `installed`: same
/// version, same target kernel, strictly greater version-release.
pub fn is_release_upgrade(
    config: &PluginConfig,
    candidate: &PackageRef,
    installed: &PackageRef,
) -> Result<bool> {
    if candidate.name != installed.name || candidate.version != installed.version {
        return Ok(false);
    }
    if kmod_target(config, candidate)? != kmod_target(config, installed)? {
        return Ok(false);
    }
    Ok(Evr::new(&candidate.version, &candidate.release)
        > Evr::new(&installed.version, &installed.release))
}

fn stream_kmod_name(config: &PluginConfig, driver: &PackageRef) -> String {
    driver
        .name
        .replacen(&config.driver_basename, &config.kmod_prefix, 1)
}

fn versioned_prefix(config: &PluginConfig, driver: &PackageRef) -> String {
    format!("{}-{}-", config.kmod_prefix, driver.version)
}
