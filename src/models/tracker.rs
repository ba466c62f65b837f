use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Schedule, TrackerColor};

/// A user-defined recurring habit. Immutable once created; the id is
/// generated at creation and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    pub id: Uuid,
    pub title: String,
    pub color: TrackerColor,
    pub emoji: String,
    pub schedule: Schedule,
}

impl Tracker {
    /// Builds a tracker with a fresh id. The title and emoji must be
    /// non-empty; this is checked here, before anything reaches a store.
    pub fn new(
        title: impl Into<String>,
        color: TrackerColor,
        emoji: impl Into<String>,
        schedule: Schedule,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            bail!("tracker title must not be empty");
        }

        let emoji = emoji.into();
        if emoji.is_empty() {
            bail!("tracker emoji must not be empty");
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            color,
            emoji,
            schedule,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekDay;

    #[test]
    fn new_generates_unique_ids() {
        let schedule: Schedule = [WeekDay::Monday].into_iter().collect();
        let first = Tracker::new("Run", TrackerColor::rgb(255, 0, 0), "🏃", schedule.clone())
            .unwrap();
        let second =
            Tracker::new("Run", TrackerColor::rgb(255, 0, 0), "🏃", schedule).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn new_rejects_blank_title() {
        let result = Tracker::new("   ", TrackerColor::rgb(0, 0, 0), "🏃", Schedule::new());
        assert!(result.is_err());
    }

    #[test]
    fn new_rejects_empty_emoji() {
        let result = Tracker::new("Run", TrackerColor::rgb(0, 0, 0), "", Schedule::new());
        assert!(result.is_err());
    }
}
