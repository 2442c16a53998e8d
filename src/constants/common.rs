// Common constants used throughout the codebase

/// System-wide configuration directory
pub const DEFAULT_CONFIG_DIR: &str = "/etc/kmodguard";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "kmodguard.kdl";

/// Driver package base name; streams append `-branch-NNN` or `-latest`
pub const DEFAULT_DRIVER_BASENAME: &str = "nvidia-driver";

/// Driver stream names. Subpackages (`nvidia-driver-libs`, ...) must not match.
pub const DEFAULT_DRIVER_PATTERN: &str = r"^nvidia-driver-(branch-[0-9]{3}|latest)$";

/// Prefix shared by every precompiled kernel module package
pub const DEFAULT_KMOD_PREFIX: &str = "kmod-nvidia";

pub const DEFAULT_KERNEL_NAME: &str = "kernel";
pub const DEFAULT_KERNEL_CORE_NAME: &str = "kernel-core";

/// Substring identifying source-rebuilt (DKMS) variants
pub const DEFAULT_DKMS_MARKER: &str = "dkms";

/// Prefix for plugin log lines
pub const DEFAULT_LOG_TAG: &str = "NVIDIA";
