//! Completion state derived from the flat record set.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::TrackerRecord;

/// What toggling a (tracker, day) pair would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Complete,
    Uncomplete,
}

/// True iff a record exists for the tracker on that calendar day.
pub fn is_completed(
    records: &HashSet<TrackerRecord>,
    tracker_id: Uuid,
    date: NaiveDate,
) -> bool {
    records.contains(&TrackerRecord::new(tracker_id, date))
}

/// Total number of days the tracker was ever completed on.
pub fn completion_count(records: &HashSet<TrackerRecord>, tracker_id: Uuid) -> usize {
    records
        .iter()
        .filter(|record| record.tracker_id == tracker_id)
        .count()
}

/// Decides what toggling would do. Days strictly after `today` are refused:
/// a completion cannot be recorded for a day that has not happened yet.
pub fn toggle_action(
    records: &HashSet<TrackerRecord>,
    tracker_id: Uuid,
    date: NaiveDate,
    today: NaiveDate,
) -> Option<ToggleAction> {
    if date > today {
        return None;
    }

    if is_completed(records, tracker_id, date) {
        Some(ToggleAction::Uncomplete)
    } else {
        Some(ToggleAction::Complete)
    }
}

/// Returns the record set after toggling the (tracker, day) pair: a record
/// is added if absent and removed if present. Toggling a day after `today`
/// returns the set unchanged.
pub fn toggle(
    records: &HashSet<TrackerRecord>,
    tracker_id: Uuid,
    date: NaiveDate,
    today: NaiveDate,
) -> HashSet<TrackerRecord> {
    let mut result = records.clone();
    match toggle_action(records, tracker_id, date, today) {
        Some(ToggleAction::Complete) => {
            result.insert(TrackerRecord::new(tracker_id, date));
        }
        Some(ToggleAction::Uncomplete) => {
            result.remove(&TrackerRecord::new(tracker_id, date));
        }
        None => {}
    }
    result
}
