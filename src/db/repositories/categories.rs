use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;

use crate::db::connection::Database;
use crate::models::TrackerCategory;
use crate::store::{CategoryStore, ChangeSubscription, StoreChange};

use super::row_to_tracker;

impl Database {
    /// Creates a category. Duplicate titles are rejected; the UNIQUE
    /// constraint on `categories.title` is the backstop.
    pub async fn create_category(&self, title: &str) -> Result<()> {
        let title = title.to_string();
        self.execute(move |conn| {
            if title.trim().is_empty() {
                bail!("category title must not be empty");
            }

            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE title = ?1)",
                params![title],
                |row| row.get(0),
            )?;
            if exists {
                bail!("category '{title}' already exists");
            }

            conn.execute(
                "INSERT INTO categories (title, created_at) VALUES (?1, ?2)",
                params![title, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
        .await?;

        self.notify(StoreChange::Categories);
        Ok(())
    }

    /// Renames a category in place. Its trackers stay attached through the
    /// category id.
    pub async fn rename_category(&self, old_title: &str, new_title: &str) -> Result<()> {
        let old_title = old_title.to_string();
        let new_title = new_title.to_string();
        self.execute(move |conn| {
            if new_title.trim().is_empty() {
                bail!("category title must not be empty");
            }

            let taken: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE title = ?1)",
                params![new_title],
                |row| row.get(0),
            )?;
            if taken {
                bail!("category '{new_title}' already exists");
            }

            let rows_affected = conn.execute(
                "UPDATE categories SET title = ?1 WHERE title = ?2",
                params![new_title, old_title],
            )?;
            if rows_affected == 0 {
                bail!("category '{old_title}' not found");
            }
            Ok(())
        })
        .await?;

        self.notify(StoreChange::Categories);
        Ok(())
    }

    /// Deletes a category by title. Its trackers and their records go with
    /// it (foreign keys cascade).
    pub async fn delete_category(&self, title: &str) -> Result<()> {
        let title = title.to_string();
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM categories WHERE title = ?1", params![title])?;
            if rows_affected == 0 {
                bail!("category '{title}' not found");
            }
            Ok(())
        })
        .await?;

        self.notify(StoreChange::Categories);
        Ok(())
    }

    /// All categories with their trackers. Categories are ordered by
    /// title, trackers within a category by (title, id).
    pub async fn get_categories(&self) -> Result<Vec<TrackerCategory>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare("SELECT id, title FROM categories ORDER BY title ASC")?;
            let mut rows = stmt.query([])?;

            let mut heads: Vec<(i64, String)> = Vec::new();
            while let Some(row) = rows.next()? {
                heads.push((row.get(0)?, row.get(1)?));
            }

            let mut tracker_stmt = conn.prepare(
                "SELECT id, title, emoji, color_hex, schedule_mask
                 FROM trackers
                 WHERE category_id = ?1
                 ORDER BY title ASC, id ASC",
            )?;

            let mut categories = Vec::with_capacity(heads.len());
            for (category_id, title) in heads {
                let mut tracker_rows = tracker_stmt.query(params![category_id])?;
                let mut trackers = Vec::new();
                while let Some(row) = tracker_rows.next()? {
                    trackers.push(row_to_tracker(row)?);
                }
                categories.push(TrackerCategory::new(title, trackers));
            }

            Ok(categories)
        })
        .await
    }
}

#[async_trait]
impl CategoryStore for Database {
    async fn fetch_all(&self) -> Result<Vec<TrackerCategory>> {
        self.get_categories().await
    }

    async fn create(&self, title: &str) -> Result<()> {
        self.create_category(title).await
    }

    async fn rename(&self, old_title: &str, new_title: &str) -> Result<()> {
        self.rename_category(old_title, new_title).await
    }

    async fn delete(&self, title: &str) -> Result<()> {
        self.delete_category(title).await
    }

    fn subscribe(&self) -> ChangeSubscription {
        Database::subscribe(self)
    }
}
