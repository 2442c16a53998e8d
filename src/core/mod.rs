pub mod classifier;
pub mod editor;
pub mod naming;
pub mod planner;
pub mod release;
pub mod resolver;
pub mod types;
pub mod version;

pub use classifier::{Classification, PackageSetClassifier};
pub use editor::TransactionEditor;
pub use planner::{PlanReport, ScanReport, TransactionPlanner};
pub use resolver::{KmodResolver, ModulePackage, Resolution};
pub use types::{ActionKind, Evr, PackageRef, PendingActions, PlannedAction};
