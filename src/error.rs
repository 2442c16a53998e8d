use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KmodError {
    /// No kmod build exists for a kernel/driver pair. Recoverable: callers log and skip.
    #[error(
        "No kernel module package {kmod} for kernel version {kernel} and driver {driver} could be found"
    )]
    NoCompatibleModule {
        kmod: String,
        kernel: String,
        driver: String,
    },

    /// Release string has fewer dot-separated fields than the caller needs to strip.
    #[error("Malformed release '{release}': expected at least {expected} trailing field(s)")]
    MalformedRelease { release: String, expected: usize },

    /// Versioned kmod name does not carry `<driver version>-<kernel version>-<kernel release>`.
    #[error("Malformed kmod name '{name}': expected {expected}")]
    MalformedKmodName { name: String, expected: String },

    /// Continuing would desynchronize the host transaction.
    #[error("Transaction invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Expected a single match for {what}, found {count}")]
    AmbiguousMultipleMatch { what: String, count: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Host error: {0}")]
    HostError(String),

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

impl KmodError {
    /// Whether a hook may log this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoCompatibleModule { .. }
                | Self::MalformedRelease { .. }
                | Self::MalformedKmodName { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, KmodError>;
