use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The diet a user is following, if any.
///
/// `Untracked` is an explicit member rather than an absent value: it means
/// "no diet tracking configured" and is the baseline a first-ever diet
/// selection is reported against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    #[default]
    Untracked,
    Balanced,
    Keto,
    LowCarb,
    Paleo,
    Mediterranean,
    Vegan,
    Vegetarian,
    Carnivore,
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietType::Untracked => write!(f, "untracked"),
            DietType::Balanced => write!(f, "balanced"),
            DietType::Keto => write!(f, "keto"),
            DietType::LowCarb => write!(f, "low_carb"),
            DietType::Paleo => write!(f, "paleo"),
            DietType::Mediterranean => write!(f, "mediterranean"),
            DietType::Vegan => write!(f, "vegan"),
            DietType::Vegetarian => write!(f, "vegetarian"),
            DietType::Carnivore => write!(f, "carnivore"),
        }
    }
}

impl FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "untracked" | "none" => Ok(DietType::Untracked),
            "balanced" => Ok(DietType::Balanced),
            "keto" => Ok(DietType::Keto),
            "low_carb" => Ok(DietType::LowCarb),
            "paleo" => Ok(DietType::Paleo),
            "mediterranean" => Ok(DietType::Mediterranean),
            "vegan" => Ok(DietType::Vegan),
            "vegetarian" => Ok(DietType::Vegetarian),
            "carnivore" => Ok(DietType::Carnivore),
            _ => Err(format!(
                "Invalid diet type '{}'. Valid options: untracked, balanced, keto, \
                 low_carb, paleo, mediterranean, vegan, vegetarian, carnivore",
                s
            )),
        }
    }
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MacroTargets {
    pub fn new(protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            protein_g,
            carbs_g,
            fat_g,
        }
    }
}

impl fmt::Display for MacroTargets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "protein {}g / carbs {}g / fat {}g",
            self.protein_g, self.carbs_g, self.fat_g
        )
    }
}

/// The diet portion of a routine snapshot: which diet is followed plus
/// the macro targets that go with it.
///
/// Both fields are required on the wire. Persisted data missing the macros
/// fails deserialization outright rather than being quietly zero-filled,
/// which would make a later comparison report "no macro change" against
/// values the user never set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DietSettings {
    #[serde(rename = "type")]
    pub diet_type: DietType,
    pub macros: MacroTargets,
}

impl DietSettings {
    pub fn new(diet_type: DietType) -> Self {
        Self {
            diet_type,
            macros: MacroTargets::default(),
        }
    }

    pub fn with_macros(mut self, macros: MacroTargets) -> Self {
        self.macros = macros;
        self
    }
}
