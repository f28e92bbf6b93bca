//! Structured diff between two routine snapshots.
//!
//! The types here are the contract with downstream consumers: the diff must
//! be complete enough that a renderer or audit log can show every change
//! without re-deriving anything from the snapshots themselves.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{DietType, Frequency, RoutineItem, TimeOfDay, Weekday};

/// A change of the selected diet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietChange {
    pub from: DietType,
    pub to: DietType,
}

/// A change of a single macro target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroChange {
    pub from: f64,
    pub to: f64,
}

/// Per-field macro target changes. Only fields that actually differ are
/// present; a fully-empty value is never reported (the comparator uses
/// `None` at the `RoutineChanges` level instead).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<MacroChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<MacroChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<MacroChange>,
}

impl MacroChanges {
    pub fn is_empty(&self) -> bool {
        self.protein_g.is_none() && self.carbs_g.is_none() && self.fat_g.is_none()
    }
}

/// One tracked field of a [`RoutineItem`] that differs between two snapshots,
/// with both the old and new value.
///
/// One variant per tracked field, each carrying that field's own types, so a
/// new item field cannot be silently skipped: adding it to `RoutineItem`
/// without a variant here leaves the differ incomplete in a way the compiler
/// and tests catch, not a dynamic lookup that quietly misses it.
///
/// Serializes as `{"field": "timing", "from": ..., "to": ...}`; absent
/// optional values serialize as `null`, which is a legitimate endpoint of a
/// change (a field being set for the first time, or cleared).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldChange {
    Timing {
        from: Option<TimeOfDay>,
        to: Option<TimeOfDay>,
    },
    Timings {
        from: Option<BTreeSet<TimeOfDay>>,
        to: Option<BTreeSet<TimeOfDay>>,
    },
    Frequency {
        from: Option<Frequency>,
        to: Option<Frequency>,
    },
    FrequencyDays {
        from: Option<BTreeSet<Weekday>>,
        to: Option<BTreeSet<Weekday>>,
    },
    Duration {
        from: Option<String>,
        to: Option<String>,
    },
}

impl FieldChange {
    /// The name of the item field this change applies to.
    pub fn field(&self) -> &'static str {
        match self {
            FieldChange::Timing { .. } => "timing",
            FieldChange::Timings { .. } => "timings",
            FieldChange::Frequency { .. } => "frequency",
            FieldChange::FrequencyDays { .. } => "frequency_days",
            FieldChange::Duration { .. } => "duration",
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt<T: fmt::Display>(value: &Option<T>) -> String {
            match value {
                Some(v) => v.to_string(),
                None => "(none)".to_string(),
            }
        }

        fn set<T: fmt::Display>(value: &Option<BTreeSet<T>>) -> String {
            match value {
                Some(v) => {
                    let tags: Vec<String> = v.iter().map(|t| t.to_string()).collect();
                    tags.join(",")
                }
                None => "(none)".to_string(),
            }
        }

        match self {
            FieldChange::Timing { from, to } => {
                write!(f, "timing: {} -> {}", opt(from), opt(to))
            }
            FieldChange::Timings { from, to } => {
                write!(f, "timings: {} -> {}", set(from), set(to))
            }
            FieldChange::Frequency { from, to } => {
                write!(f, "frequency: {} -> {}", opt(from), opt(to))
            }
            FieldChange::FrequencyDays { from, to } => {
                write!(f, "frequency_days: {} -> {}", set(from), set(to))
            }
            FieldChange::Duration { from, to } => {
                write!(f, "duration: {} -> {}", opt(from), opt(to))
            }
        }
    }
}

/// An item present in both snapshots whose tracked fields differ. Carries the
/// new item value plus every field-level change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedItem {
    pub item: RoutineItem,
    pub changes: Vec<FieldChange>,
}

/// The full structured difference between two routine snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutineChanges {
    /// `None` when the diet type did not change.
    #[serde(default)]
    pub diet_changed: Option<DietChange>,
    /// `None` when no macro field changed (never `Some` of an empty value).
    #[serde(default)]
    pub macros_changed: Option<MacroChanges>,
    /// Items present only in the new snapshot.
    #[serde(default)]
    pub started: Vec<RoutineItem>,
    /// Items present only in the old snapshot.
    #[serde(default)]
    pub stopped: Vec<RoutineItem>,
    /// Items present in both with differing tracked fields.
    #[serde(default)]
    pub modified: Vec<ModifiedItem>,
}

impl RoutineChanges {
    /// True when nothing changed at all.
    pub fn is_empty(&self) -> bool {
        self.diet_changed.is_none()
            && self.macros_changed.is_none()
            && self.started.is_empty()
            && self.stopped.is_empty()
            && self.modified.is_empty()
    }
}

impl fmt::Display for RoutineChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No changes");
        }

        if let Some(diet) = &self.diet_changed {
            writeln!(f, "Diet: {} -> {}", diet.from, diet.to)?;
        }
        if let Some(macros) = &self.macros_changed {
            for (name, change) in [
                ("protein", macros.protein_g),
                ("carbs", macros.carbs_g),
                ("fat", macros.fat_g),
            ] {
                if let Some(change) = change {
                    writeln!(f, "Macro {}: {}g -> {}g", name, change.from, change.to)?;
                }
            }
        }
        for item in &self.started {
            writeln!(f, "Started: {}", item)?;
        }
        for item in &self.stopped {
            writeln!(f, "Stopped: {}", item)?;
        }
        for modified in &self.modified {
            writeln!(f, "Changed: {}", modified.item.id)?;
            for change in &modified.changes {
                writeln!(f, "  {}", change)?;
            }
        }

        Ok(())
    }
}
