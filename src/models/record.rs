use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marks a tracker as completed on one calendar day. Equality and hashing
/// cover the whole (tracker, day) pair, so a `HashSet<TrackerRecord>`
/// holds at most one record per tracker per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerRecord {
    pub tracker_id: Uuid,
    pub date: NaiveDate,
}

impl TrackerRecord {
    pub fn new(tracker_id: Uuid, date: NaiveDate) -> Self {
        Self { tracker_id, date }
    }

    /// Builds a record from a timestamp, discarding the time of day.
    pub fn at(tracker_id: Uuid, instant: DateTime<Utc>) -> Self {
        Self {
            tracker_id,
            date: instant.date_naive(),
        }
    }
}
