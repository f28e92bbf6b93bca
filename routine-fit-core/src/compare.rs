//! Snapshot comparison.
//!
//! [`compare`] turns two snapshots into a [`RoutineChanges`] value;
//! [`diff_fields`] reports the per-field differences of one matched item.
//! Both are pure functions with no I/O and no side effects.

use std::collections::HashMap;

use crate::changes::{
    DietChange, FieldChange, MacroChange, MacroChanges, ModifiedItem, RoutineChanges,
};
use crate::models::{DietType, MacroTargets, RoutineItem, RoutineSnapshot};

/// Computes the structured difference between two routine snapshots.
///
/// With no `current` snapshot there is nothing to report and the zero diff
/// comes back. With no `previous` snapshot (first-ever routine) every current
/// item is reported as started, and the diet is reported as a change from
/// [`DietType::Untracked`] only when the current diet is itself tracked;
/// macros are not diffed against a baseline that never existed.
///
/// `started`/`stopped`/`modified` follow snapshot iteration order, but
/// callers must treat them as unordered sets.
pub fn compare(
    previous: Option<&RoutineSnapshot>,
    current: Option<&RoutineSnapshot>,
) -> RoutineChanges {
    let Some(current) = current else {
        return RoutineChanges::default();
    };

    let Some(previous) = previous else {
        let diet_changed = (current.diet.diet_type != DietType::Untracked).then(|| DietChange {
            from: DietType::Untracked,
            to: current.diet.diet_type,
        });

        return RoutineChanges {
            diet_changed,
            macros_changed: None,
            started: current.items.clone(),
            stopped: Vec::new(),
            modified: Vec::new(),
        };
    };

    let diet_changed = (previous.diet.diet_type != current.diet.diet_type).then(|| DietChange {
        from: previous.diet.diet_type,
        to: current.diet.diet_type,
    });

    let macros_changed = diff_macros(&previous.diet.macros, &current.diet.macros);

    let previous_by_id: HashMap<&str, &RoutineItem> =
        previous.items.iter().map(|i| (i.id.as_str(), i)).collect();
    let current_by_id: HashMap<&str, &RoutineItem> =
        current.items.iter().map(|i| (i.id.as_str(), i)).collect();

    let mut started = Vec::new();
    let mut modified = Vec::new();
    for item in &current.items {
        match previous_by_id.get(item.id.as_str()) {
            None => started.push(item.clone()),
            Some(previous_item) => {
                let changes = diff_fields(previous_item, item);
                if !changes.is_empty() {
                    modified.push(ModifiedItem {
                        item: item.clone(),
                        changes,
                    });
                }
            }
        }
    }

    let stopped = previous
        .items
        .iter()
        .filter(|i| !current_by_id.contains_key(i.id.as_str()))
        .cloned()
        .collect();

    RoutineChanges {
        diet_changed,
        macros_changed,
        started,
        stopped,
        modified,
    }
}

/// Reports the tracked fields that differ between two versions of the same
/// logical item.
///
/// Exactly five fields are compared; the item id never appears in the result.
/// Scalar fields compare by value (both absent is equal, absent vs. present
/// is a difference), the set fields compare by membership regardless of
/// order. Returns an empty vec when nothing differs.
pub fn diff_fields(previous: &RoutineItem, current: &RoutineItem) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if previous.timing != current.timing {
        changes.push(FieldChange::Timing {
            from: previous.timing,
            to: current.timing,
        });
    }
    if previous.timings != current.timings {
        changes.push(FieldChange::Timings {
            from: previous.timings.clone(),
            to: current.timings.clone(),
        });
    }
    if previous.frequency != current.frequency {
        changes.push(FieldChange::Frequency {
            from: previous.frequency,
            to: current.frequency,
        });
    }
    if previous.frequency_days != current.frequency_days {
        changes.push(FieldChange::FrequencyDays {
            from: previous.frequency_days.clone(),
            to: current.frequency_days.clone(),
        });
    }
    if previous.duration != current.duration {
        changes.push(FieldChange::Duration {
            from: previous.duration.clone(),
            to: current.duration.clone(),
        });
    }

    changes
}

fn diff_macros(previous: &MacroTargets, current: &MacroTargets) -> Option<MacroChanges> {
    fn delta(from: f64, to: f64) -> Option<MacroChange> {
        (from != to).then_some(MacroChange { from, to })
    }

    let changes = MacroChanges {
        protein_g: delta(previous.protein_g, current.protein_g),
        carbs_g: delta(previous.carbs_g, current.carbs_g),
        fat_g: delta(previous.fat_g, current.fat_g),
    };

    (!changes.is_empty()).then_some(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DietSettings, Frequency, TimeOfDay, Weekday};

    fn keto_snapshot() -> RoutineSnapshot {
        RoutineSnapshot::new(
            DietSettings::new(DietType::Keto).with_macros(MacroTargets::new(150.0, 20.0, 100.0)),
        )
        .with_item(RoutineItem::new("1").with_timing(TimeOfDay::Am))
        .with_item(RoutineItem::new("2").with_timing(TimeOfDay::Pm))
    }

    #[test]
    fn test_no_current_yields_zero_diff() {
        let previous = keto_snapshot();
        assert!(compare(Some(&previous), None).is_empty());
        assert!(compare(None, None).is_empty());
    }

    #[test]
    fn test_snapshot_is_identical_to_itself() {
        let snapshot = keto_snapshot();
        let changes = compare(Some(&snapshot), Some(&snapshot));

        assert_eq!(changes.diet_changed, None);
        assert_eq!(changes.macros_changed, None);
        assert!(changes.started.is_empty());
        assert!(changes.stopped.is_empty());
        assert!(changes.modified.is_empty());
    }

    #[test]
    fn test_first_snapshot_reports_items_started() {
        let current = RoutineSnapshot::new(DietSettings::new(DietType::Keto))
            .with_item(RoutineItem::new("x").with_timing(TimeOfDay::Am));

        let changes = compare(None, Some(&current));

        assert_eq!(
            changes.diet_changed,
            Some(DietChange {
                from: DietType::Untracked,
                to: DietType::Keto,
            })
        );
        assert_eq!(changes.macros_changed, None);
        assert_eq!(changes.started, current.items);
        assert!(changes.stopped.is_empty());
        assert!(changes.modified.is_empty());
    }

    #[test]
    fn test_first_snapshot_with_untracked_diet_reports_no_diet_change() {
        let current =
            RoutineSnapshot::default().with_item(RoutineItem::new("walk").with_timing(TimeOfDay::Pm));

        let changes = compare(None, Some(&current));
        assert_eq!(changes.diet_changed, None);
        assert_eq!(changes.started.len(), 1);
    }

    #[test]
    fn test_first_snapshot_does_not_diff_macros() {
        // Non-default macros with no prior baseline are not reported; there
        // is no "from" value for them to be a change against.
        let current = RoutineSnapshot::new(
            DietSettings::new(DietType::Keto).with_macros(MacroTargets::new(150.0, 20.0, 100.0)),
        );

        let changes = compare(None, Some(&current));
        assert_eq!(changes.macros_changed, None);
    }

    #[test]
    fn test_full_comparison() {
        let previous = keto_snapshot();
        let current = RoutineSnapshot::new(
            DietSettings::new(DietType::Keto).with_macros(MacroTargets::new(160.0, 20.0, 100.0)),
        )
        .with_item(RoutineItem::new("1").with_timing(TimeOfDay::Pm))
        .with_item(RoutineItem::new("3").with_timing(TimeOfDay::Am));

        let changes = compare(Some(&previous), Some(&current));

        assert_eq!(changes.diet_changed, None);
        assert_eq!(
            changes.macros_changed,
            Some(MacroChanges {
                protein_g: Some(MacroChange {
                    from: 150.0,
                    to: 160.0,
                }),
                ..Default::default()
            })
        );
        assert_eq!(
            changes.started,
            vec![RoutineItem::new("3").with_timing(TimeOfDay::Am)]
        );
        assert_eq!(
            changes.stopped,
            vec![RoutineItem::new("2").with_timing(TimeOfDay::Pm)]
        );
        assert_eq!(
            changes.modified,
            vec![ModifiedItem {
                item: RoutineItem::new("1").with_timing(TimeOfDay::Pm),
                changes: vec![FieldChange::Timing {
                    from: Some(TimeOfDay::Am),
                    to: Some(TimeOfDay::Pm),
                }],
            }]
        );
    }

    #[test]
    fn test_diet_change_detected() {
        let previous = RoutineSnapshot::new(DietSettings::new(DietType::Keto));
        let current = RoutineSnapshot::new(DietSettings::new(DietType::Paleo));

        let changes = compare(Some(&previous), Some(&current));
        assert_eq!(
            changes.diet_changed,
            Some(DietChange {
                from: DietType::Keto,
                to: DietType::Paleo,
            })
        );
    }

    #[test]
    fn test_every_item_lands_in_exactly_one_bucket() {
        let previous = RoutineSnapshot::default()
            .with_item(RoutineItem::new("only-old"))
            .with_item(RoutineItem::new("same").with_timing(TimeOfDay::Am))
            .with_item(RoutineItem::new("edited").with_frequency(Frequency::Daily));
        let current = RoutineSnapshot::default()
            .with_item(RoutineItem::new("same").with_timing(TimeOfDay::Am))
            .with_item(RoutineItem::new("edited").with_frequency(Frequency::Weekly))
            .with_item(RoutineItem::new("only-new"));

        let changes = compare(Some(&previous), Some(&current));

        let started: Vec<&str> = changes.started.iter().map(|i| i.id.as_str()).collect();
        let stopped: Vec<&str> = changes.stopped.iter().map(|i| i.id.as_str()).collect();
        let modified: Vec<&str> = changes.modified.iter().map(|m| m.item.id.as_str()).collect();

        assert_eq!(started, vec!["only-new"]);
        assert_eq!(stopped, vec!["only-old"]);
        assert_eq!(modified, vec!["edited"]);
    }

    #[test]
    fn test_diff_fields_empty_for_identical_items() {
        let item = RoutineItem::new("x")
            .with_timings([TimeOfDay::Am, TimeOfDay::Pm])
            .with_frequency(Frequency::SpecificDays)
            .with_frequency_days([Weekday::Monday, Weekday::Friday]);

        assert!(diff_fields(&item, &item).is_empty());
    }

    #[test]
    fn test_diff_fields_set_order_does_not_matter() {
        let a = RoutineItem::new("x").with_timings([TimeOfDay::Am, TimeOfDay::Pm]);
        let b = RoutineItem::new("x").with_timings([TimeOfDay::Pm, TimeOfDay::Am]);

        assert!(diff_fields(&a, &b).is_empty());
    }

    #[test]
    fn test_diff_fields_absent_vs_present() {
        let a = RoutineItem::new("x");
        let b = RoutineItem::new("x").with_duration("2 weeks");

        assert_eq!(
            diff_fields(&a, &b),
            vec![FieldChange::Duration {
                from: None,
                to: Some("2 weeks".to_string()),
            }]
        );
    }

    #[test]
    fn test_diff_fields_symmetric_detection_with_swapped_direction() {
        let a = RoutineItem::new("x")
            .with_timing(TimeOfDay::Am)
            .with_frequency(Frequency::Daily);
        let b = RoutineItem::new("x")
            .with_timing(TimeOfDay::Pm)
            .with_frequency(Frequency::EveryOtherDay);

        let forward = diff_fields(&a, &b);
        let backward = diff_fields(&b, &a);
        assert_eq!(forward.len(), backward.len());

        assert_eq!(
            forward,
            vec![
                FieldChange::Timing {
                    from: Some(TimeOfDay::Am),
                    to: Some(TimeOfDay::Pm),
                },
                FieldChange::Frequency {
                    from: Some(Frequency::Daily),
                    to: Some(Frequency::EveryOtherDay),
                },
            ]
        );
        assert_eq!(
            backward,
            vec![
                FieldChange::Timing {
                    from: Some(TimeOfDay::Pm),
                    to: Some(TimeOfDay::Am),
                },
                FieldChange::Frequency {
                    from: Some(Frequency::EveryOtherDay),
                    to: Some(Frequency::Daily),
                },
            ]
        );
    }

    #[test]
    fn test_diff_fields_reports_every_changed_field_once() {
        let a = RoutineItem::new("x")
            .with_timing(TimeOfDay::Am)
            .with_timings([TimeOfDay::Am])
            .with_frequency(Frequency::Daily)
            .with_frequency_days([Weekday::Monday])
            .with_duration("1 week");
        let b = RoutineItem::new("x")
            .with_timing(TimeOfDay::Pm)
            .with_timings([TimeOfDay::Pm])
            .with_frequency(Frequency::Weekly)
            .with_frequency_days([Weekday::Tuesday])
            .with_duration("2 weeks");

        let changes = diff_fields(&a, &b);
        let fields: Vec<&str> = changes.iter().map(|c| c.field()).collect();
        assert_eq!(
            fields,
            vec!["timing", "timings", "frequency", "frequency_days", "duration"]
        );
    }

    #[test]
    fn test_macro_diff_only_reports_differing_fields() {
        let previous = RoutineSnapshot::new(
            DietSettings::new(DietType::Keto).with_macros(MacroTargets::new(150.0, 20.0, 100.0)),
        );
        let current = RoutineSnapshot::new(
            DietSettings::new(DietType::Keto).with_macros(MacroTargets::new(150.0, 25.0, 90.0)),
        );

        let changes = compare(Some(&previous), Some(&current));
        let macros = changes.macros_changed.unwrap();

        assert_eq!(macros.protein_g, None);
        assert_eq!(macros.carbs_g, Some(MacroChange { from: 20.0, to: 25.0 }));
        assert_eq!(macros.fat_g, Some(MacroChange { from: 100.0, to: 90.0 }));
    }
}
