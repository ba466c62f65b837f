//! Category list view-model: the create/rename/delete flows and the
//! selection state behind the category picker.

use std::sync::Arc;

use anyhow::{bail, Result};
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::models::TrackerCategory;
use crate::store::CategoryStore;

type DataChangedCallback = Box<dyn Fn() + Send + Sync>;
type SelectionChangedCallback = Box<dyn Fn(Option<usize>) + Send + Sync>;

/// Snapshot of the category collection plus a single-selection cursor.
/// The store is injected at construction; the snapshot is rebuilt
/// wholesale after every mutation or external change.
pub struct CategoryList {
    categories: Vec<TrackerCategory>,
    selected: Option<usize>,
    store: Arc<dyn CategoryStore>,
    on_data_changed: Option<DataChangedCallback>,
    on_selection_changed: Option<SelectionChangedCallback>,
}

impl CategoryList {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self {
            categories: Vec::new(),
            selected: None,
            store,
            on_data_changed: None,
            on_selection_changed: None,
        }
    }

    pub fn set_on_data_changed(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.on_data_changed = Some(Box::new(callback));
    }

    pub fn set_on_selection_changed(
        &mut self,
        callback: impl Fn(Option<usize>) + Send + Sync + 'static,
    ) {
        self.on_selection_changed = Some(Box::new(callback));
    }

    pub async fn start(&mut self) {
        self.reload().await;
    }

    /// Replaces the snapshot from the store, degrading to an empty list on
    /// fetch failure.
    pub async fn reload(&mut self) {
        self.categories = match self.store.fetch_all().await {
            Ok(categories) => categories,
            Err(err) => {
                warn!("category fetch failed, showing an empty list: {err:#}");
                Vec::new()
            }
        };
        self.notify_data_changed();
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[TrackerCategory] {
        &self.categories
    }

    pub fn title_at(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(|category| category.title.as_str())
    }

    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| category.title == title)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Moves the selection cursor. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.categories.len() {
            return;
        }
        self.selected = Some(index);
        self.notify_selection_changed();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.notify_selection_changed();
    }

    /// Creates a category. Empty titles are rejected here, duplicate
    /// titles by the store.
    pub async fn create(&mut self, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            bail!("category title must not be empty");
        }
        self.store.create(title).await?;
        self.reload().await;
        Ok(())
    }

    pub async fn rename(&mut self, old_title: &str, new_title: &str) -> Result<()> {
        if new_title.trim().is_empty() {
            bail!("category title must not be empty");
        }
        self.store.rename(old_title, new_title).await?;
        self.reload().await;
        Ok(())
    }

    /// Deletes a category by title, clearing the selection if it pointed
    /// at the deleted entry.
    pub async fn delete(&mut self, title: &str) -> Result<()> {
        self.store.delete(title).await?;

        if let Some(index) = self.selected {
            if self
                .categories
                .get(index)
                .is_some_and(|category| category.title == title)
            {
                self.selected = None;
                self.notify_selection_changed();
            }
        }

        self.reload().await;
        Ok(())
    }

    /// Reloads on every store change until the token is cancelled.
    pub async fn run(&mut self, cancel: CancellationToken) {
        let mut changes = self.store.subscribe();

        loop {
            let change = tokio::select! {
                _ = cancel.cancelled() => break,
                change = changes.changed() => change,
            };

            if change.is_none() {
                debug!("store change feed closed, stopping category list loop");
                break;
            }

            while changes.try_changed().is_some() {}
            self.reload().await;
        }
    }

    fn notify_data_changed(&self) {
        if let Some(callback) = &self.on_data_changed {
            callback();
        }
    }

    fn notify_selection_changed(&self) {
        if let Some(callback) = &self.on_selection_changed {
            callback(self.selected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ChangeSubscription, StoreChange};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::broadcast;

    struct FakeCategoryStore {
        titles: Mutex<Vec<String>>,
        fail_fetches: bool,
        events: broadcast::Sender<StoreChange>,
    }

    impl FakeCategoryStore {
        fn new(fail_fetches: bool) -> Arc<Self> {
            let (events, _) = broadcast::channel(16);
            Arc::new(Self {
                titles: Mutex::new(Vec::new()),
                fail_fetches,
                events,
            })
        }
    }

    #[async_trait]
    impl CategoryStore for FakeCategoryStore {
        async fn fetch_all(&self) -> Result<Vec<TrackerCategory>> {
            if self.fail_fetches {
                bail!("store unavailable");
            }
            Ok(self
                .titles
                .lock()
                .unwrap()
                .iter()
                .map(|title| TrackerCategory::new(title.clone(), Vec::new()))
                .collect())
        }

        async fn create(&self, title: &str) -> Result<()> {
            let mut titles = self.titles.lock().unwrap();
            if titles.iter().any(|existing| existing == title) {
                bail!("category '{title}' already exists");
            }
            titles.push(title.to_string());
            let _ = self.events.send(StoreChange::Categories);
            Ok(())
        }

        async fn rename(&self, old_title: &str, new_title: &str) -> Result<()> {
            let mut titles = self.titles.lock().unwrap();
            match titles.iter_mut().find(|title| *title == old_title) {
                Some(title) => *title = new_title.to_string(),
                None => bail!("category '{old_title}' not found"),
            }
            let _ = self.events.send(StoreChange::Categories);
            Ok(())
        }

        async fn delete(&self, title: &str) -> Result<()> {
            self.titles.lock().unwrap().retain(|existing| existing != title);
            let _ = self.events.send(StoreChange::Categories);
            Ok(())
        }

        fn subscribe(&self) -> ChangeSubscription {
            ChangeSubscription::new(self.events.subscribe())
        }
    }

    #[tokio::test]
    async fn create_reloads_the_snapshot() {
        let store = FakeCategoryStore::new(false);
        let mut list = CategoryList::new(store);

        list.create("Health").await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.title_at(0), Some("Health"));
        assert_eq!(list.index_of("Health"), Some(0));
    }

    #[tokio::test]
    async fn empty_titles_are_rejected_before_the_store() {
        let store = FakeCategoryStore::new(false);
        let mut list = CategoryList::new(store.clone());

        assert!(list.create("   ").await.is_err());
        assert!(store.titles.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_titles_are_rejected() {
        let store = FakeCategoryStore::new(false);
        let mut list = CategoryList::new(store);

        list.create("Health").await.unwrap();
        assert!(list.create("Health").await.is_err());
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn rename_keeps_the_entry() {
        let store = FakeCategoryStore::new(false);
        let mut list = CategoryList::new(store);

        list.create("Helath").await.unwrap();
        list.rename("Helath", "Health").await.unwrap();
        assert_eq!(list.title_at(0), Some("Health"));
    }

    #[tokio::test]
    async fn deleting_the_selected_category_clears_the_selection() {
        let store = FakeCategoryStore::new(false);
        let mut list = CategoryList::new(store);

        list.create("Health").await.unwrap();
        list.create("Work").await.unwrap();

        list.select(0);
        assert!(list.is_selected(0));

        list.delete("Health").await.unwrap();
        assert_eq!(list.selected_index(), None);
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn deleting_another_category_keeps_the_selection() {
        let store = FakeCategoryStore::new(false);
        let mut list = CategoryList::new(store);

        list.create("Health").await.unwrap();
        list.create("Work").await.unwrap();

        list.select(0);
        list.delete("Work").await.unwrap();
        assert_eq!(list.selected_index(), Some(0));
    }

    #[tokio::test]
    async fn out_of_range_selection_is_ignored() {
        let store = FakeCategoryStore::new(false);
        let mut list = CategoryList::new(store);

        list.create("Health").await.unwrap();
        list.select(5);
        assert_eq!(list.selected_index(), None);
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_an_empty_list() {
        let store = FakeCategoryStore::new(true);
        let mut list = CategoryList::new(store);

        list.start().await;
        assert!(list.is_empty());
    }
}
