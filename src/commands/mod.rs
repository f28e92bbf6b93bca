mod changes_cmd;
mod config_cmd;
mod diet;
mod item;
mod version_cmd;

pub use changes_cmd::{DiffCommand, StatusCommand};
pub use config_cmd::ConfigCommand;
pub use diet::DietCommand;
pub use item::ItemCommand;
pub use version_cmd::{DiscardCommand, HistoryCommand, SaveCommand};

use clap::ValueEnum;
use std::io::{self, Write};

#[derive(Debug, Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks the user for y/N confirmation on stdin.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
