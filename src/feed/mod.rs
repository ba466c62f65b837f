//! Home-feed state: which trackers are visible for the selected date and
//! which of them are completed.

pub mod completion;
pub mod visibility;

pub use completion::{completion_count, is_completed, toggle, toggle_action, ToggleAction};
pub use visibility::visible_categories;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{debug, warn};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::models::{Schedule, Tracker, TrackerCategory, TrackerColor, TrackerRecord};
use crate::store::{CategoryStore, RecordStore, TrackerStore};

type DataChangedCallback = Box<dyn Fn() + Send + Sync>;

/// View-model for the tracker list screen. Holds the selected date and
/// wholesale snapshots of the persisted collections; the stores are
/// injected at construction and snapshots are rebuilt from scratch on
/// every reload.
pub struct TrackerFeed {
    categories: Vec<TrackerCategory>,
    completed: HashSet<TrackerRecord>,
    selected_date: NaiveDate,
    category_store: Arc<dyn CategoryStore>,
    tracker_store: Arc<dyn TrackerStore>,
    record_store: Arc<dyn RecordStore>,
    on_data_changed: Option<DataChangedCallback>,
}

impl TrackerFeed {
    pub fn new(
        category_store: Arc<dyn CategoryStore>,
        tracker_store: Arc<dyn TrackerStore>,
        record_store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            categories: Vec::new(),
            completed: HashSet::new(),
            selected_date: Local::now().date_naive(),
            category_store,
            tracker_store,
            record_store,
            on_data_changed: None,
        }
    }

    /// Registers a callback fired after every snapshot or date change.
    pub fn set_on_data_changed(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.on_data_changed = Some(Box::new(callback));
    }

    pub async fn start(&mut self) {
        self.reload().await;
    }

    /// Replaces both snapshots from the stores. A fetch failure degrades to
    /// an empty collection; the projection stays stale until the next
    /// successful reload.
    pub async fn reload(&mut self) {
        self.categories = match self.category_store.fetch_all().await {
            Ok(categories) => categories,
            Err(err) => {
                warn!("category fetch failed, showing an empty list: {err:#}");
                Vec::new()
            }
        };

        self.completed = match self.record_store.fetch_all().await {
            Ok(records) => records.into_iter().collect(),
            Err(err) => {
                warn!("record fetch failed, treating all trackers as incomplete: {err:#}");
                HashSet::new()
            }
        };

        self.notify_data_changed();
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.notify_data_changed();
    }

    /// The unfiltered category snapshot.
    pub fn categories(&self) -> &[TrackerCategory] {
        &self.categories
    }

    /// Categories filtered down to the trackers scheduled on the selected
    /// date's weekday.
    pub fn visible_categories(&self) -> Vec<TrackerCategory> {
        visibility::visible_categories(&self.categories, self.selected_date)
    }

    /// Whether the tracker is completed on the selected date.
    pub fn is_completed(&self, tracker_id: Uuid) -> bool {
        completion::is_completed(&self.completed, tracker_id, self.selected_date)
    }

    /// Total days this tracker was ever completed on.
    pub fn completion_count(&self, tracker_id: Uuid) -> usize {
        completion::completion_count(&self.completed, tracker_id)
    }

    /// Toggles completion of the tracker for the selected date and writes
    /// the change through to the record store.
    pub async fn toggle_completion(&mut self, tracker_id: Uuid) -> Result<()> {
        self.toggle_completion_on(tracker_id, Local::now().date_naive())
            .await
    }

    /// Same as [`toggle_completion`](Self::toggle_completion) with an
    /// explicit "today". Selected dates after `today` are ignored: a
    /// completion cannot be recorded for a day that has not happened yet.
    pub async fn toggle_completion_on(
        &mut self,
        tracker_id: Uuid,
        today: NaiveDate,
    ) -> Result<()> {
        let record = TrackerRecord::new(tracker_id, self.selected_date);

        match completion::toggle_action(&self.completed, tracker_id, self.selected_date, today) {
            Some(ToggleAction::Complete) => {
                self.record_store.create(record).await?;
                self.completed.insert(record);
            }
            Some(ToggleAction::Uncomplete) => {
                self.record_store.delete(record).await?;
                self.completed.remove(&record);
            }
            None => {
                debug!(
                    "ignoring completion toggle for future date {}",
                    self.selected_date
                );
                return Ok(());
            }
        }

        self.notify_data_changed();
        Ok(())
    }

    /// Validates and persists a new tracker under the named category. The
    /// category is created on first use; the local snapshot catches up via
    /// the store change notification.
    pub async fn add_tracker(
        &self,
        title: &str,
        color: TrackerColor,
        emoji: &str,
        schedule: Schedule,
        category_title: &str,
    ) -> Result<Tracker> {
        let tracker = Tracker::new(title, color, emoji, schedule)?;
        self.tracker_store.create(&tracker, category_title).await?;
        Ok(tracker)
    }

    /// Reloads on every store change until the token is cancelled. Queued
    /// duplicate notifications are drained so one mutation triggers one
    /// reload.
    pub async fn run(&mut self, cancel: CancellationToken) {
        let mut category_changes = self.category_store.subscribe();
        let mut tracker_changes = self.tracker_store.subscribe();
        let mut record_changes = self.record_store.subscribe();

        loop {
            let change = tokio::select! {
                _ = cancel.cancelled() => break,
                change = category_changes.changed() => change,
                change = tracker_changes.changed() => change,
                change = record_changes.changed() => change,
            };

            if change.is_none() {
                debug!("store change feed closed, stopping feed loop");
                break;
            }

            while category_changes.try_changed().is_some()
                || tracker_changes.try_changed().is_some()
                || record_changes.try_changed().is_some()
            {}

            self.reload().await;
        }
    }

    fn notify_data_changed(&self) {
        if let Some(callback) = &self.on_data_changed {
            callback();
        }
    }
}
