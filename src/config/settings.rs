//! Plugin settings
//!
//! Package names and patterns the core works with. Built once at startup,
//! from defaults optionally overridden by a KDL file, then passed by
//! reference into every hook.

use crate::config::kdl::{RawSettings, parse_settings};
use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_CONFIG_DIR, DEFAULT_DKMS_MARKER, DEFAULT_DRIVER_BASENAME,
    DEFAULT_DRIVER_PATTERN, DEFAULT_KERNEL_CORE_NAME, DEFAULT_KERNEL_NAME, DEFAULT_KMOD_PREFIX,
    DEFAULT_LOG_TAG,
};
use crate::error::{KmodError, Result};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How kmod package names map to a driver and a kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KmodNaming {
    /// `kmod-nvidia-latest`, version = kernel version,
    /// release = `<kernel release>.<module release>.<dist>`
    #[default]
    Stream,
    /// `kmod-nvidia-<driver version>-<kernel version>-<kernel release w/o dist>`,
    /// version = driver version
    Versioned,
}

impl FromStr for KmodNaming {
    type Err = KmodError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "stream" => Ok(Self::Stream),
            "versioned" => Ok(Self::Versioned),
            other => Err(KmodError::ConfigError(format!(
                "Invalid value for 'naming': '{}'. Valid: stream, versioned",
                other
            ))),
        }
    }
}

impl fmt::Display for KmodNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream => write!(f, "stream"),
            Self::Versioned => write!(f, "versioned"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub driver_basename: String,
    pub driver_pattern: Regex,
    pub kmod_prefix: String,
    pub kernel_name: String,
    pub kernel_core_name: String,
    pub dkms_marker: String,
    pub naming: KmodNaming,
    pub log_tag: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            driver_basename: DEFAULT_DRIVER_BASENAME.to_string(),
            driver_pattern: Regex::new(DEFAULT_DRIVER_PATTERN)
                .expect("built-in driver pattern is valid"),
            kmod_prefix: DEFAULT_KMOD_PREFIX.to_string(),
            kernel_name: DEFAULT_KERNEL_NAME.to_string(),
            kernel_core_name: DEFAULT_KERNEL_CORE_NAME.to_string(),
            dkms_marker: DEFAULT_DKMS_MARKER.to_string(),
            naming: KmodNaming::default(),
            log_tag: DEFAULT_LOG_TAG.to_string(),
        }
    }
}

impl PluginConfig {
    /// Load settings from `path`, or from the system config file when it
    /// exists, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| KmodError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_kdl_str(&content)
    }

    pub fn from_kdl_str(content: &str) -> Result<Self> {
        let raw = parse_settings(content)?;
        Self::default().apply(raw)
    }

    fn apply(mut self, raw: RawSettings) -> Result<Self> {
        if let Some(value) = raw.driver {
            self.driver_basename = non_empty("driver", value)?;
        }
        if let Some(value) = raw.driver_pattern {
            self.driver_pattern =
                Regex::new(&value).map_err(|e| KmodError::InvalidRegex(e.to_string()))?;
        }
        if let Some(value) = raw.kmod_prefix {
            self.kmod_prefix = non_empty("kmod-prefix", value)?;
        }
        if let Some(value) = raw.kernel {
            self.kernel_name = non_empty("kernel", value)?;
        }
        if let Some(value) = raw.kernel_core {
            self.kernel_core_name = non_empty("kernel-core", value)?;
        }
        if let Some(value) = raw.dkms_marker {
            self.dkms_marker = non_empty("dkms-marker", value)?;
        }
        if let Some(value) = raw.naming {
            self.naming = value.parse()?;
        }
        if let Some(value) = raw.tag {
            self.log_tag = value;
        }
        Ok(self)
    }

    pub fn is_dkms(&self, name: &str) -> bool {
        name.contains(&self.dkms_marker)
    }

    /// Driver stream package (`nvidia-driver-latest`), never its DKMS twin
    pub fn is_driver(&self, name: &str) -> bool {
        self.driver_pattern.is_match(name) && !self.is_dkms(name)
    }

    pub fn is_kmod(&self, name: &str) -> bool {
        name.starts_with(&self.kmod_prefix) && !self.is_dkms(name)
    }

    pub fn is_kernel(&self, name: &str) -> bool {
        name == self.kernel_name
    }
}

pub fn default_config_path() -> PathBuf {
    Path::new(DEFAULT_CONFIG_DIR).join(CONFIG_FILE_NAME)
}

fn non_empty(key: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(KmodError::ConfigError(format!("'{}' cannot be empty", key)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests;
