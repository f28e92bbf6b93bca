mod diet;
mod item;
mod snapshot;
mod version;

pub use diet::{DietSettings, DietType, MacroTargets};
pub use item::{Frequency, RoutineItem, TimeOfDay, Weekday};
pub use snapshot::{RoutineSnapshot, SnapshotError};
pub use version::RoutineVersion;
