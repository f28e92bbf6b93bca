//! Routine Fit Core Library
//!
//! Routine snapshots, append-only versioning, and change detection shared by
//! Routine Fit applications.

pub mod changes;
pub mod compare;
pub mod models;
pub mod store;
pub mod tracker;

pub use changes::{
    DietChange, FieldChange, MacroChange, MacroChanges, ModifiedItem, RoutineChanges,
};
pub use compare::{compare, diff_fields};
pub use models::{
    DietSettings, DietType, Frequency, MacroTargets, RoutineItem, RoutineSnapshot, RoutineVersion,
    SnapshotError, TimeOfDay, Weekday,
};
pub use store::{StoreError, VersionStore};
pub use tracker::{ChangeTracker, TrackerError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
