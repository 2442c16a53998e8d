//! `PackageHost` implementations shipped with the crate
//!
//! - `MemoryHost`: in-memory transaction, loadable from a JSON snapshot
//! - `RpmHost`: read-only view of the system rpm database and dnf repositories

pub mod memory;
pub mod rpm;
pub mod snapshot;

pub use memory::MemoryHost;
pub use rpm::RpmHost;
pub use snapshot::TransactionSnapshot;
