use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Schedule, TrackerColor};

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("failed to parse {field} '{value}'"))
}

pub fn parse_uuid(value: &str, field: &str) -> Result<Uuid> {
    Uuid::parse_str(value).with_context(|| format!("failed to parse {field} '{value}'"))
}

pub fn parse_color(value: &str, field: &str) -> Result<TrackerColor> {
    TrackerColor::from_hex(value).with_context(|| format!("failed to parse {field}"))
}

pub fn schedule_from_i64(value: i64, field: &str) -> Result<Schedule> {
    let mask = u16::try_from(value)
        .map_err(|_| anyhow!("{field} value {value} is outside the bitmask range"))?;
    Ok(Schedule::from_mask(mask))
}
