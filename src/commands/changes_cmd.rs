//! Unsaved-change inspection commands.

use clap::Args;

use routine_fit_core::{ChangeTracker, VersionStore};

use super::OutputFormat;
use crate::store::FileVersionStore;

/// Builds a tracker over the store, loads the baseline from the latest saved
/// version, and feeds it the current working snapshot.
pub(crate) async fn load_tracker(
    store: FileVersionStore,
) -> Result<ChangeTracker<FileVersionStore>, Box<dyn std::error::Error>> {
    let current = store.load_current_snapshot().await?;

    let mut tracker = ChangeTracker::new(store);
    tracker.initialize().await?;
    tracker.observe(current)?;
    Ok(tracker)
}

/// Summarize unsaved changes against the last saved version
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    pub fn run(&self, store: FileVersionStore) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let tracker = load_tracker(store).await?;

            if !tracker.has_unsaved_changes() {
                println!("No unsaved changes");
                return Ok(());
            }

            let changes = tracker.changes().ok_or("tracker not initialized")?;
            let mut parts = Vec::new();
            if changes.diet_changed.is_some() {
                parts.push("diet changed".to_string());
            }
            if changes.macros_changed.is_some() {
                parts.push("macros changed".to_string());
            }
            if !changes.started.is_empty() {
                parts.push(format!("{} started", changes.started.len()));
            }
            if !changes.stopped.is_empty() {
                parts.push(format!("{} stopped", changes.stopped.len()));
            }
            if !changes.modified.is_empty() {
                parts.push(format!("{} modified", changes.modified.len()));
            }

            println!("Unsaved changes: {}", parts.join(", "));
            println!("Run 'routine diff' for details or 'routine save' to keep them");
            Ok(())
        })
    }
}

/// Show the full diff against the last saved version
#[derive(Debug, Args)]
pub struct DiffCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl DiffCommand {
    pub fn run(&self, store: FileVersionStore) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let tracker = load_tracker(store).await?;
            let changes = tracker.changes().ok_or("tracker not initialized")?;

            match self.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(changes)?),
                OutputFormat::Text => print!("{}", changes),
            }
            Ok(())
        })
    }
}
