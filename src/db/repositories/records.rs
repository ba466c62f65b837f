use anyhow::Result;
use async_trait::async_trait;
use rusqlite::params;

use crate::db::connection::Database;
use crate::db::helpers::{parse_date, parse_uuid};
use crate::models::TrackerRecord;
use crate::store::{ChangeSubscription, RecordStore, StoreChange};

impl Database {
    /// Marks a tracker completed on a day. Re-adding the same day is a
    /// no-op; the (tracker_id, date) primary key keeps records unique.
    pub async fn add_record(&self, record: TrackerRecord) -> Result<()> {
        self.execute(move |conn| {
            conn.execute(
                "INSERT OR IGNORE INTO records (tracker_id, date) VALUES (?1, ?2)",
                params![record.tracker_id.to_string(), record.date.to_string()],
            )?;
            Ok(())
        })
        .await?;

        self.notify(StoreChange::Records);
        Ok(())
    }

    /// Removes a completion mark. Deleting an absent record is a no-op.
    pub async fn delete_record(&self, record: TrackerRecord) -> Result<()> {
        self.execute(move |conn| {
            conn.execute(
                "DELETE FROM records WHERE tracker_id = ?1 AND date = ?2",
                params![record.tracker_id.to_string(), record.date.to_string()],
            )?;
            Ok(())
        })
        .await?;

        self.notify(StoreChange::Records);
        Ok(())
    }

    pub async fn get_records(&self) -> Result<Vec<TrackerRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT tracker_id, date FROM records ORDER BY date ASC, tracker_id ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                let tracker_id: String = row.get("tracker_id")?;
                let date: String = row.get("date")?;
                records.push(TrackerRecord::new(
                    parse_uuid(&tracker_id, "tracker_id")?,
                    parse_date(&date, "date")?,
                ));
            }

            Ok(records)
        })
        .await
    }
}

#[async_trait]
impl RecordStore for Database {
    async fn fetch_all(&self) -> Result<Vec<TrackerRecord>> {
        self.get_records().await
    }

    async fn create(&self, record: TrackerRecord) -> Result<()> {
        self.add_record(record).await
    }

    async fn delete(&self, record: TrackerRecord) -> Result<()> {
        self.delete_record(record).await
    }

    fn subscribe(&self) -> ChangeSubscription {
        Database::subscribe(self)
    }
}
