//! Release string normalization
//!
//! A stream-named kmod carries `<kernel release>.<module release>.<dist>` in its
//! release field, e.g. `862.1.el7`. Dropping the trailing fields recovers the
//! kernel release the module was built against.

use crate::core::types::{Evr, PackageRef};
use crate::error::{KmodError, Result};

/// Remove the last `count` dot-separated fields from `release`.
///
/// Fails with `MalformedRelease` when the release has fewer than `count` dots,
/// instead of truncating more than intended.
pub fn strip_trailing_fields(release: &str, count: usize) -> Result<&str> {
    let mut stripped = release;
    for _ in 0..count {
        match stripped.rfind('.') {
            Some(idx) => stripped = &stripped[..idx],
            None => {
                return Err(KmodError::MalformedRelease {
                    release: release.to_string(),
                    expected: count,
                });
            }
        }
    }
    Ok(stripped)
}

/// Kernel release a stream-named kmod targets (`862.1.el7` -> `862`)
pub fn kmod_kernel_release(release: &str) -> Result<&str> {
    strip_trailing_fields(release, 2)
}

/// Release without its dist tag (`240.el8` -> `240`)
pub fn without_dist(release: &str) -> Result<&str> {
    strip_trailing_fields(release, 1)
}

/// Whether a kmod target is an exact build match for `kernel`, as opposed to
/// an older build reused across an ABI-compatible kernel update.
pub fn pairs_with(target: &Evr, kernel: &PackageRef) -> Result<bool> {
    let kernel_release = without_dist(&kernel.release)?;
    Ok(*target == Evr::new(&kernel.version, kernel_release))
}
