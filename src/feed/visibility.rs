use chrono::{Datelike, NaiveDate};

use crate::models::{Tracker, TrackerCategory, WeekDay};

/// Projects the category list onto one calendar date: only trackers whose
/// schedule includes that date's weekday survive, and categories left with
/// no trackers are dropped. Category and tracker order is preserved; the
/// input is not mutated.
pub fn visible_categories(
    categories: &[TrackerCategory],
    date: NaiveDate,
) -> Vec<TrackerCategory> {
    let day = WeekDay::from(date.weekday());

    categories
        .iter()
        .filter_map(|category| {
            let trackers: Vec<Tracker> = category
                .trackers
                .iter()
                .filter(|tracker| tracker.schedule.contains(day))
                .cloned()
                .collect();

            if trackers.is_empty() {
                None
            } else {
                Some(TrackerCategory::new(category.title.clone(), trackers))
            }
        })
        .collect()
}
