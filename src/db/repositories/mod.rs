mod categories;
mod records;
mod trackers;

use anyhow::Result;
use rusqlite::Row;

use crate::db::helpers::{parse_color, parse_uuid, schedule_from_i64};
use crate::models::Tracker;

fn row_to_tracker(row: &Row) -> Result<Tracker> {
    let id: String = row.get("id")?;
    let color_hex: String = row.get("color_hex")?;
    let schedule_mask: i64 = row.get("schedule_mask")?;

    Ok(Tracker {
        id: parse_uuid(&id, "id")?,
        title: row.get("title")?,
        emoji: row.get("emoji")?,
        color: parse_color(&color_hex, "color_hex")?,
        schedule: schedule_from_i64(schedule_mask, "schedule_mask")?,
    })
}
