use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::connection::Database;
use crate::models::Tracker;
use crate::store::{ChangeSubscription, StoreChange, TrackerStore};

use super::row_to_tracker;

/// Looks the category up by title, creating it on first use. Runs inside
/// the caller's DB task so tracker and category land together.
fn fetch_or_create_category(conn: &Connection, title: &str) -> Result<i64> {
    if title.trim().is_empty() {
        bail!("category title must not be empty");
    }

    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM categories WHERE title = ?1",
            params![title],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    conn.execute(
        "INSERT INTO categories (title, created_at) VALUES (?1, ?2)",
        params![title, Utc::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Database {
    pub async fn create_tracker(&self, tracker: &Tracker, category_title: &str) -> Result<()> {
        let tracker = tracker.clone();
        let category_title = category_title.to_string();
        self.execute(move |conn| {
            if tracker.title.trim().is_empty() {
                bail!("tracker title must not be empty");
            }

            let category_id = fetch_or_create_category(conn, &category_title)?;
            conn.execute(
                "INSERT INTO trackers (id, title, emoji, color_hex, schedule_mask, category_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    tracker.id.to_string(),
                    tracker.title,
                    tracker.emoji,
                    tracker.color.to_hex(),
                    i64::from(tracker.schedule.mask()),
                    category_id,
                    Utc::now().to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await?;

        self.notify(StoreChange::Trackers);
        Ok(())
    }

    pub async fn get_trackers(&self) -> Result<Vec<Tracker>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, emoji, color_hex, schedule_mask
                 FROM trackers
                 ORDER BY title ASC, id ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut trackers = Vec::new();
            while let Some(row) = rows.next()? {
                trackers.push(row_to_tracker(row)?);
            }

            Ok(trackers)
        })
        .await
    }
}

#[async_trait]
impl TrackerStore for Database {
    async fn fetch_all(&self) -> Result<Vec<Tracker>> {
        self.get_trackers().await
    }

    async fn create(&self, tracker: &Tracker, category_title: &str) -> Result<()> {
        self.create_tracker(tracker, category_title).await
    }

    fn subscribe(&self) -> ChangeSubscription {
        Database::subscribe(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Schedule, TrackerColor, WeekDay};

    fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("trackers.sqlite3")).unwrap();
        (dir, db)
    }

    fn sample_tracker(title: &str, days: &[WeekDay]) -> Tracker {
        Tracker::new(
            title,
            TrackerColor::rgb(0xE6, 0x6D, 0x00),
            "🏃",
            days.iter().copied().collect::<Schedule>(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn create_under_a_new_category_creates_the_category() {
        let (_dir, db) = test_db();
        let tracker = sample_tracker("Run", &[WeekDay::Monday]);

        db.create_tracker(&tracker, "Health").await.unwrap();

        let categories = db.get_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].title, "Health");
        assert_eq!(categories[0].trackers, vec![tracker]);
    }

    #[tokio::test]
    async fn create_under_an_existing_category_reuses_it() {
        let (_dir, db) = test_db();

        db.create_category("Health").await.unwrap();
        db.create_tracker(&sample_tracker("Run", &[WeekDay::Monday]), "Health")
            .await
            .unwrap();
        db.create_tracker(&sample_tracker("Swim", &[WeekDay::Tuesday]), "Health")
            .await
            .unwrap();

        let categories = db.get_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].trackers.len(), 2);
    }

    #[tokio::test]
    async fn color_and_schedule_survive_the_round_trip() {
        let (_dir, db) = test_db();
        let tracker = sample_tracker(
            "Read",
            &[WeekDay::Monday, WeekDay::Wednesday, WeekDay::Sunday],
        );

        db.create_tracker(&tracker, "Evening").await.unwrap();

        let fetched = db.get_trackers().await.unwrap();
        assert_eq!(fetched, vec![tracker]);
    }

    #[tokio::test]
    async fn empty_schedule_round_trips_as_empty() {
        let (_dir, db) = test_db();
        let tracker = sample_tracker("Someday", &[]);

        db.create_tracker(&tracker, "Misc").await.unwrap();

        let fetched = db.get_trackers().await.unwrap();
        assert!(fetched[0].schedule.is_empty());
    }

    #[tokio::test]
    async fn create_notifies_subscribers() {
        let (_dir, db) = test_db();

        let mut subscription = Database::subscribe(&db);
        db.create_tracker(&sample_tracker("Run", &[WeekDay::Monday]), "Health")
            .await
            .unwrap();
        assert_eq!(subscription.changed().await, Some(StoreChange::Trackers));
    }

    #[tokio::test]
    async fn blank_category_title_is_rejected() {
        let (_dir, db) = test_db();
        let tracker = sample_tracker("Run", &[WeekDay::Monday]);
        assert!(db.create_tracker(&tracker, "  ").await.is_err());
    }
}
