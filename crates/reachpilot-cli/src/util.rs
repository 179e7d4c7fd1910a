use crate::error::invalid_input;
use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use reachpilot_core::domain::ConnectionId;
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

/// Midnight on the first of the current month, in the local timezone.
pub fn start_of_month_utc() -> Result<i64> {
    let now = Local::now();
    let date = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .ok_or_else(|| anyhow!("invalid month start"))?;
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid month start"))?;
    local_to_utc_timestamp(naive)
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_timestamp_date(ts: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
        .with_timezone(&Local);
    dt.format("%Y-%m-%d").to_string()
}

pub fn parse_connection_id(raw: &str) -> Result<ConnectionId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("connection id cannot be empty"));
    }
    ConnectionId::from_str(trimmed).map_err(|_| invalid_input("invalid connection id"))
}

fn local_to_utc_timestamp(naive: NaiveDateTime) -> Result<i64> {
    let local = Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| anyhow!("ambiguous local time: {}", naive))?;
    Ok(local.with_timezone(&Utc).timestamp())
}
