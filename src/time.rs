/// Wall-clock helpers shared by slot generation, filtering and mock data.
///
/// All stored instants are UTC. Calendar questions ("which day", "which
/// week", "what does the clock say") are answered in the viewer's time zone,
/// passed explicitly as any `chrono::TimeZone`.
use crate::error::{ScheduleError, ScheduleResult};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::fmt::Display;

/// Parse a time of day in `HH:MM` format.
pub fn parse_time_of_day(value: &str) -> ScheduleResult<NaiveTime> {
    let invalid = || ScheduleError::InvalidTimeOfDay(value.to_string());

    let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return Err(invalid());
    }
    let hour = hour.parse::<u32>().map_err(|_| invalid())?;
    let minute = minute.parse::<u32>().map_err(|_| invalid())?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Resolve a wall-clock time in `tz` to an absolute instant.
///
/// Ambiguous times (clocks falling back) resolve to the earliest instant.
/// Times skipped by a spring-forward transition do not exist and fail.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> ScheduleResult<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(ScheduleError::NonexistentLocalTime(local))
}

/// Calendar date of an instant as seen in `tz`.
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(date)
}

/// The seven dates of the week starting at `week_start`.
pub fn week_days(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..7u64)
        .filter_map(|offset| week_start.checked_add_days(Days::new(offset)))
        .collect()
}

/// 12-hour clock label such as `9:00 AM`.
pub fn clock_label<Tz>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%-I:%M %p").to_string()
}
