//! Diet settings commands.

use clap::{Args, Subcommand};
use std::str::FromStr;

use routine_fit_core::{DietSettings, DietType};

use super::OutputFormat;
use crate::store::FileVersionStore;

/// Manage diet settings of the working routine
#[derive(Debug, Args)]
pub struct DietCommand {
    #[command(subcommand)]
    command: DietSubcommand,
}

#[derive(Debug, Subcommand)]
enum DietSubcommand {
    /// Select the diet to follow (untracked, keto, paleo, ...)
    Set {
        /// Diet type
        diet_type: String,
    },

    /// Set daily macro targets in grams
    Macros {
        /// Protein target (g)
        #[arg(long)]
        protein: Option<f64>,

        /// Carbs target (g)
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat target (g)
        #[arg(long)]
        fat: Option<f64>,
    },

    /// Show the current diet settings
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl DietCommand {
    pub fn run(&self, store: &FileVersionStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DietSubcommand::Set { diet_type } => {
                let diet_type = DietType::from_str(diet_type)?;
                let snapshot = store.read_current()?;

                let diet = DietSettings {
                    diet_type,
                    macros: snapshot.diet.macros,
                };
                store.write_current(&snapshot.with_diet(diet))?;

                println!("Diet set to {}", diet_type);
                Ok(())
            }
            DietSubcommand::Macros { protein, carbs, fat } => {
                if protein.is_none() && carbs.is_none() && fat.is_none() {
                    return Err("Specify at least one of --protein, --carbs, --fat".into());
                }

                let snapshot = store.read_current()?;
                let mut diet = snapshot.diet.clone();
                if let Some(protein) = protein {
                    diet.macros.protein_g = *protein;
                }
                if let Some(carbs) = carbs {
                    diet.macros.carbs_g = *carbs;
                }
                if let Some(fat) = fat {
                    diet.macros.fat_g = *fat;
                }

                store.write_current(&snapshot.with_diet(diet.clone()))?;

                println!("Macro targets: {}", diet.macros);
                Ok(())
            }
            DietSubcommand::Show { format } => {
                let snapshot = store.read_current()?;

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&snapshot.diet)?);
                    }
                    OutputFormat::Text => {
                        println!("Diet: {}", snapshot.diet.diet_type);
                        println!("Macros: {}", snapshot.diet.macros);
                    }
                }
                Ok(())
            }
        }
    }
}
