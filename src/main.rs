use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod store;

use commands::{
    ConfigCommand, DietCommand, DiffCommand, DiscardCommand, HistoryCommand, ItemCommand,
    SaveCommand, StatusCommand,
};
use config::Config;
use store::FileVersionStore;

#[derive(Parser)]
#[command(name = "routine")]
#[command(version)]
#[command(about = "Track your daily health routine and its history", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage diet settings and macro targets
    Diet(DietCommand),

    /// Manage routine items (supplements, habits, exercises)
    Item(ItemCommand),

    /// Summarize unsaved changes
    Status(StatusCommand),

    /// Show the full diff against the last saved version
    Diff(DiffCommand),

    /// Save the working routine as a new version
    Save(SaveCommand),

    /// Discard unsaved changes
    Discard(DiscardCommand),

    /// List saved versions
    History(HistoryCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routinefit=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;
    let store = FileVersionStore::new(config.data_dir.value.clone());

    match &cli.command {
        Some(Commands::Diet(cmd)) => cmd.run(&store),
        Some(Commands::Item(cmd)) => cmd.run(&store),
        Some(Commands::Status(cmd)) => cmd.run(store),
        Some(Commands::Diff(cmd)) => cmd.run(store),
        Some(Commands::Save(cmd)) => cmd.run(store),
        Some(Commands::Discard(cmd)) => cmd.run(store),
        Some(Commands::History(cmd)) => cmd.run(&store),
        Some(Commands::Config(cmd)) => cmd.run(&config),
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}
