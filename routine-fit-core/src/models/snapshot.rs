use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::diet::DietSettings;
use super::item::RoutineItem;

/// A snapshot that cannot be compared: the comparator refuses to guess at
/// what malformed data means.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Duplicate item id '{0}' in snapshot")]
    DuplicateItemId(String),

    #[error("Macro target '{field}' is not a finite number: {value}")]
    InvalidMacro { field: &'static str, value: f64 },
}

/// An immutable point-in-time capture of a user's full routine: the diet
/// settings plus every tracked item.
///
/// Snapshots are values, not entities. Editing never mutates one in place;
/// the builder-style helpers consume `self` and hand back a new snapshot, so
/// a baseline held elsewhere can never be changed out from under a diff.
///
/// Item ids must be unique within a snapshot; [`RoutineSnapshot::validate`]
/// enforces that along with the macro fields being finite numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutineSnapshot {
    pub diet: DietSettings,
    #[serde(default)]
    pub items: Vec<RoutineItem>,
}

impl RoutineSnapshot {
    pub fn new(diet: DietSettings) -> Self {
        Self {
            diet,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<RoutineItem>) -> Self {
        self.items = items;
        self
    }

    /// Returns a snapshot with the item added, or replaced if an item with
    /// the same id already exists.
    pub fn with_item(mut self, item: RoutineItem) -> Self {
        match self.items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        self
    }

    /// Returns a snapshot with the item of the given id removed.
    pub fn without_item(mut self, id: &str) -> Self {
        self.items.retain(|i| i.id != id);
        self
    }

    /// Returns a snapshot with the diet settings replaced.
    pub fn with_diet(mut self, diet: DietSettings) -> Self {
        self.diet = diet;
        self
    }

    /// Looks up an item by id.
    pub fn item(&self, id: &str) -> Option<&RoutineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Checks the snapshot invariants: unique item ids and finite macro
    /// targets. Snapshots arriving from persistence must pass this before
    /// being handed to the comparator.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(SnapshotError::DuplicateItemId(item.id.clone()));
            }
        }

        let macros = &self.diet.macros;
        for (field, value) in [
            ("protein_g", macros.protein_g),
            ("carbs_g", macros.carbs_g),
            ("fat_g", macros.fat_g),
        ] {
            if !value.is_finite() {
                return Err(SnapshotError::InvalidMacro { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diet::{DietType, MacroTargets};
    use crate::models::item::TimeOfDay;

    #[test]
    fn test_snapshot_default_is_untracked_and_empty() {
        let snapshot = RoutineSnapshot::default();
        assert_eq!(snapshot.diet.diet_type, DietType::Untracked);
        assert!(snapshot.items.is_empty());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_with_item_appends_then_replaces() {
        let snapshot = RoutineSnapshot::default()
            .with_item(RoutineItem::new("d3").with_timing(TimeOfDay::Am))
            .with_item(RoutineItem::new("d3").with_timing(TimeOfDay::Pm));

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.item("d3").unwrap().timing, Some(TimeOfDay::Pm));
    }

    #[test]
    fn test_without_item() {
        let snapshot = RoutineSnapshot::default()
            .with_item(RoutineItem::new("d3"))
            .with_item(RoutineItem::new("zinc"))
            .without_item("d3");

        assert!(snapshot.item("d3").is_none());
        assert!(snapshot.item("zinc").is_some());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let snapshot = RoutineSnapshot::default().with_items(vec![
            RoutineItem::new("d3"),
            RoutineItem::new("d3").with_timing(TimeOfDay::Pm),
        ]);

        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::DuplicateItemId(id)) if id == "d3"
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_macros() {
        let snapshot = RoutineSnapshot::new(
            DietSettings::new(DietType::Keto).with_macros(MacroTargets::new(f64::NAN, 20.0, 100.0)),
        );

        assert!(matches!(
            snapshot.validate(),
            Err(SnapshotError::InvalidMacro {
                field: "protein_g",
                ..
            })
        ));
    }

    #[test]
    fn test_snapshot_missing_macros_rejected_at_parse_time() {
        // Persisted data without macro targets must not sneak in as zeros
        // and then compare as "unchanged".
        let result =
            serde_json::from_str::<RoutineSnapshot>(r#"{"diet":{"type":"keto"},"items":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_missing_diet_rejected_at_parse_time() {
        let result = serde_json::from_str::<RoutineSnapshot>(r#"{"items":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let snapshot = RoutineSnapshot::new(
            DietSettings::new(DietType::Keto).with_macros(MacroTargets::new(150.0, 20.0, 100.0)),
        )
        .with_item(RoutineItem::new("d3").with_timing(TimeOfDay::Am));

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: RoutineSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
