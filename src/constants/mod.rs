pub mod common;

pub use common::{
    CONFIG_FILE_NAME, DEFAULT_CONFIG_DIR, DEFAULT_DKMS_MARKER, DEFAULT_DRIVER_BASENAME,
    DEFAULT_DRIVER_PATTERN, DEFAULT_KERNEL_CORE_NAME, DEFAULT_KERNEL_NAME,
    DEFAULT_KMOD_PREFIX, DEFAULT_LOG_TAG,
};
