//! Routine item commands.

use clap::{Args, Subcommand};
use std::str::FromStr;

use routine_fit_core::{Frequency, RoutineItem, TimeOfDay, Weekday};

use super::{confirm, OutputFormat};
use crate::store::FileVersionStore;

/// Manage routine items (supplements, habits, exercises)
#[derive(Debug, Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    command: ItemSubcommand,
}

#[derive(Debug, Args, Default)]
struct ScheduleArgs {
    /// Single time of day (am, midday, pm, evening, bedtime)
    #[arg(long)]
    timing: Option<String>,

    /// Time of day, repeatable for multiple times
    #[arg(long = "at", value_name = "TIME")]
    timings: Vec<String>,

    /// Frequency (daily, every-other-day, weekly, specific-days, as-needed)
    #[arg(long, short)]
    frequency: Option<String>,

    /// Weekday, repeatable, for specific-days frequency
    #[arg(long = "day", value_name = "DAY")]
    days: Vec<String>,

    /// Free-form duration (e.g. "8 weeks")
    #[arg(long)]
    duration: Option<String>,
}

#[derive(Debug, Subcommand)]
enum ItemSubcommand {
    /// Start tracking a new item
    Add {
        /// Stable item id (e.g. "magnesium", "morning-walk")
        id: String,

        #[command(flatten)]
        schedule: ScheduleArgs,
    },

    /// Change the schedule of an existing item
    Set {
        /// Item id
        id: String,

        #[command(flatten)]
        schedule: ScheduleArgs,
    },

    /// Stop tracking an item
    Remove {
        /// Item id
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// List tracked items
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ItemCommand {
    pub fn run(&self, store: &FileVersionStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ItemSubcommand::Add { id, schedule } => {
                let snapshot = store.read_current()?;
                if snapshot.item(id).is_some() {
                    return Err(
                        format!("Item '{}' already exists. Use 'item set' to change it.", id)
                            .into(),
                    );
                }

                let item = apply_schedule(RoutineItem::new(id), schedule)?;
                println!("Started: {}", item);
                store.write_current(&snapshot.with_item(item))?;
                Ok(())
            }
            ItemSubcommand::Set { id, schedule } => {
                let snapshot = store.read_current()?;
                let Some(existing) = snapshot.item(id).cloned() else {
                    return Err(format!("Item '{}' not found", id).into());
                };

                let item = apply_schedule(existing, schedule)?;
                println!("Updated: {}", item);
                store.write_current(&snapshot.with_item(item))?;
                Ok(())
            }
            ItemSubcommand::Remove { id, force } => {
                let snapshot = store.read_current()?;
                if snapshot.item(id).is_none() {
                    return Err(format!("Item '{}' not found", id).into());
                }

                if !force && !confirm(&format!("Stop tracking '{}'?", id))? {
                    println!("Cancelled");
                    return Ok(());
                }

                store.write_current(&snapshot.without_item(id))?;
                println!("Stopped: {}", id);
                Ok(())
            }
            ItemSubcommand::List { format } => {
                let snapshot = store.read_current()?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&snapshot.items)?);
                    }
                    OutputFormat::Text => {
                        if snapshot.items.is_empty() {
                            println!("No items tracked");
                        }
                        for item in &snapshot.items {
                            println!("{}", item);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

/// Applies the schedule flags to an item; flags that were not given leave the
/// corresponding field untouched.
fn apply_schedule(
    mut item: RoutineItem,
    schedule: &ScheduleArgs,
) -> Result<RoutineItem, Box<dyn std::error::Error>> {
    if let Some(timing) = &schedule.timing {
        item.timing = Some(TimeOfDay::from_str(timing)?);
    }
    if !schedule.timings.is_empty() {
        let timings = schedule
            .timings
            .iter()
            .map(|t| TimeOfDay::from_str(t))
            .collect::<Result<_, _>>()?;
        item.timings = Some(timings);
    }
    if let Some(frequency) = &schedule.frequency {
        item.frequency = Some(Frequency::from_str(frequency)?);
    }
    if !schedule.days.is_empty() {
        let days = schedule
            .days
            .iter()
            .map(|d| Weekday::from_str(d))
            .collect::<Result<_, _>>()?;
        item.frequency_days = Some(days);
    }
    if let Some(duration) = &schedule.duration {
        item.duration = Some(duration.clone());
    }

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_schedule_builds_item() {
        let schedule = ScheduleArgs {
            timing: Some("am".to_string()),
            frequency: Some("specific-days".to_string()),
            days: vec!["mon".to_string(), "fri".to_string()],
            duration: Some("8 weeks".to_string()),
            ..Default::default()
        };

        let item = apply_schedule(RoutineItem::new("gym"), &schedule).unwrap();

        assert_eq!(item.timing, Some(TimeOfDay::Am));
        assert_eq!(item.frequency, Some(Frequency::SpecificDays));
        assert_eq!(item.frequency_days.unwrap().len(), 2);
        assert_eq!(item.duration.as_deref(), Some("8 weeks"));
    }

    #[test]
    fn test_apply_schedule_leaves_unset_fields_alone() {
        let existing = RoutineItem::new("walk")
            .with_timing(TimeOfDay::Pm)
            .with_frequency(Frequency::Daily);
        let schedule = ScheduleArgs {
            timing: Some("am".to_string()),
            ..Default::default()
        };

        let item = apply_schedule(existing, &schedule).unwrap();

        assert_eq!(item.timing, Some(TimeOfDay::Am));
        assert_eq!(item.frequency, Some(Frequency::Daily));
    }

    #[test]
    fn test_apply_schedule_rejects_bad_tag() {
        let schedule = ScheduleArgs {
            timing: Some("brunchtime".to_string()),
            ..Default::default()
        };

        assert!(apply_schedule(RoutineItem::new("x"), &schedule).is_err());
    }
}
