//! Save, discard, and history commands.

use clap::Args;

use super::changes_cmd::load_tracker;
use super::{confirm, OutputFormat};
use crate::store::FileVersionStore;

/// Save the working routine as a new version
#[derive(Debug, Args)]
pub struct SaveCommand {
    /// Human-readable note for why this version was saved
    #[arg(long, short)]
    reason: Option<String>,
}

impl SaveCommand {
    pub fn run(&self, store: FileVersionStore) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let mut tracker = load_tracker(store).await?;

            if !tracker.has_unsaved_changes() {
                println!("No changes to save");
                return Ok(());
            }

            let version = tracker.save(self.reason.as_deref()).await?;
            println!(
                "Saved version {} at {}",
                version.id,
                version.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            if let Some(reason) = &version.reason {
                println!("Reason: {}", reason);
            }
            Ok(())
        })
    }
}

/// Throw away unsaved changes and restore the last saved version
#[derive(Debug, Args)]
pub struct DiscardCommand {
    /// Skip confirmation prompt
    #[arg(long, short)]
    force: bool,
}

impl DiscardCommand {
    pub fn run(&self, store: FileVersionStore) -> Result<(), Box<dyn std::error::Error>> {
        // Second handle for writing the restored snapshot back out after the
        // first one moves into the tracker.
        let writer = store.clone();

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let mut tracker = load_tracker(store).await?;

            if !tracker.has_unsaved_changes() {
                println!("Nothing to discard");
                return Ok(());
            }

            if !self.force && !confirm("Discard all unsaved changes?")? {
                println!("Cancelled");
                return Ok(());
            }

            let restored = tracker.discard().cloned().unwrap_or_default();
            writer.write_current(&restored)?;
            println!("Restored last saved routine");
            Ok(())
        })
    }
}

/// List saved versions, newest first
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Maximum number of versions to show
    #[arg(long, short, default_value = "10")]
    limit: usize,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl HistoryCommand {
    pub fn run(&self, store: &FileVersionStore) -> Result<(), Box<dyn std::error::Error>> {
        let mut versions = store.read_versions()?;
        versions.reverse();
        versions.truncate(self.limit);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&versions)?),
            OutputFormat::Text => {
                if versions.is_empty() {
                    println!("No versions saved yet");
                }
                for version in &versions {
                    let reason = version.reason.as_deref().unwrap_or("-");
                    println!(
                        "{}  {}  diet: {}  items: {}  {}",
                        version.saved_at.format("%Y-%m-%d %H:%M"),
                        version.id,
                        version.snapshot.diet.diet_type,
                        version.snapshot.items.len(),
                        reason
                    );
                }
            }
        }
        Ok(())
    }
}
