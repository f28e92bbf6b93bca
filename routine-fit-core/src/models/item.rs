use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Time-of-day tag for when a routine item is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Am,
    Midday,
    Pm,
    Evening,
    Bedtime,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Am => write!(f, "am"),
            TimeOfDay::Midday => write!(f, "midday"),
            TimeOfDay::Pm => write!(f, "pm"),
            TimeOfDay::Evening => write!(f, "evening"),
            TimeOfDay::Bedtime => write!(f, "bedtime"),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "am" | "morning" => Ok(TimeOfDay::Am),
            "midday" | "noon" => Ok(TimeOfDay::Midday),
            "pm" | "afternoon" => Ok(TimeOfDay::Pm),
            "evening" => Ok(TimeOfDay::Evening),
            "bedtime" | "night" => Ok(TimeOfDay::Bedtime),
            _ => Err(format!(
                "Invalid time of day '{}'. Valid options: am, midday, pm, evening, bedtime",
                s
            )),
        }
    }
}

/// How often a routine item is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    EveryOtherDay,
    Weekly,
    SpecificDays,
    AsNeeded,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::EveryOtherDay => write!(f, "every-other-day"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::SpecificDays => write!(f, "specific-days"),
            Frequency::AsNeeded => write!(f, "as-needed"),
        }
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "every-other-day" | "eod" => Ok(Frequency::EveryOtherDay),
            "weekly" => Ok(Frequency::Weekly),
            "specific-days" => Ok(Frequency::SpecificDays),
            "as-needed" | "prn" => Ok(Frequency::AsNeeded),
            _ => Err(format!(
                "Invalid frequency '{}'. Valid options: daily, every-other-day, weekly, \
                 specific-days, as-needed",
                s
            )),
        }
    }
}

/// Day-of-week tag used with [`Frequency::SpecificDays`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weekday::Monday => write!(f, "monday"),
            Weekday::Tuesday => write!(f, "tuesday"),
            Weekday::Wednesday => write!(f, "wednesday"),
            Weekday::Thursday => write!(f, "thursday"),
            Weekday::Friday => write!(f, "friday"),
            Weekday::Saturday => write!(f, "saturday"),
            Weekday::Sunday => write!(f, "sunday"),
        }
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Monday),
            "tue" | "tuesday" => Ok(Weekday::Tuesday),
            "wed" | "wednesday" => Ok(Weekday::Wednesday),
            "thu" | "thursday" => Ok(Weekday::Thursday),
            "fri" | "friday" => Ok(Weekday::Friday),
            "sat" | "saturday" => Ok(Weekday::Saturday),
            "sun" | "sunday" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday '{}'", s)),
        }
    }
}

/// One trackable action in a routine: a supplement, a habit, an exercise.
///
/// The `id` is opaque and stable; the same id appearing in two snapshots means
/// "the same logical item", even when its scheduling fields differ. Every
/// scheduling field is optional, and absence is a legitimate value rather
/// than an error. The shape is fixed on purpose: the field differ enumerates
/// these fields exhaustively, so adding one here forces the differ to be
/// updated.
///
/// An item may carry a single `timing` or a `timings` set; both are tracked.
/// The set fields use `BTreeSet` so that membership, not insertion order,
/// decides equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timings: Option<BTreeSet<TimeOfDay>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_days: Option<BTreeSet<Weekday>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl RoutineItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timing: None,
            timings: None,
            frequency: None,
            frequency_days: None,
            duration: None,
        }
    }

    pub fn with_timing(mut self, timing: TimeOfDay) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn with_timings(mut self, timings: impl IntoIterator<Item = TimeOfDay>) -> Self {
        self.timings = Some(timings.into_iter().collect());
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_frequency_days(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.frequency_days = Some(days.into_iter().collect());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}

impl fmt::Display for RoutineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;

        if let Some(timing) = self.timing {
            write!(f, " @ {}", timing)?;
        }
        if let Some(timings) = &self.timings {
            let tags: Vec<String> = timings.iter().map(|t| t.to_string()).collect();
            write!(f, " @ {}", tags.join(","))?;
        }
        if let Some(frequency) = self.frequency {
            write!(f, " ({})", frequency)?;
        }
        if let Some(days) = &self.frequency_days {
            let tags: Vec<String> = days.iter().map(|d| d.to_string()).collect();
            write!(f, " [{}]", tags.join(","))?;
        }
        if let Some(duration) = &self.duration {
            write!(f, " for {}", duration)?;
        }

        Ok(())
    }
}
