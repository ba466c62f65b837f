use serde::{Deserialize, Serialize};

use super::Tracker;

/// A named grouping of trackers. The title is the natural key: unique
/// across categories and used for lookup, rename, and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerCategory {
    pub title: String,
    pub trackers: Vec<Tracker>,
}

impl TrackerCategory {
    pub fn new(title: impl Into<String>, trackers: Vec<Tracker>) -> Self {
        Self {
            title: title.into(),
            trackers,
        }
    }
}
