use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::snapshot::RoutineSnapshot;

/// A persisted routine version: one snapshot frozen at save time.
///
/// Versions form an append-only history. A later save supersedes an earlier
/// version but never rewrites or deletes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineVersion {
    pub id: Uuid,
    pub snapshot: RoutineSnapshot,
    pub saved_at: DateTime<Utc>,
    /// Optional human-readable note for why this version was saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RoutineVersion {
    pub fn new(snapshot: RoutineSnapshot, reason: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            snapshot,
            saved_at: Utc::now(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diet::{DietSettings, DietType};

    #[test]
    fn test_version_new() {
        let snapshot = RoutineSnapshot::new(DietSettings::new(DietType::Keto));
        let version = RoutineVersion::new(snapshot.clone(), Some("starting keto".to_string()));

        assert_eq!(version.snapshot, snapshot);
        assert_eq!(version.reason.as_deref(), Some("starting keto"));
    }

    #[test]
    fn test_version_json_roundtrip() {
        let version = RoutineVersion::new(RoutineSnapshot::default(), None);

        let json = serde_json::to_string(&version).unwrap();
        let parsed: RoutineVersion = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, version.id);
        assert_eq!(parsed.saved_at, version.saved_at);
        assert_eq!(parsed.reason, None);
    }
}
