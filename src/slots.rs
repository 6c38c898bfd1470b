/// Time slot generation for the schedule grid.
///
/// Slots are laid out in wall-clock time in the viewer's zone and stored as
/// UTC instants. Consecutive slots share a boundary: `slots[i].end ==
/// slots[i + 1].start`.

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{TimeSlot, WorkingHours};
use crate::time::{clock_label, resolve_local};
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone};
use std::fmt::Display;
use tracing::debug;

/// Generate fixed-width slots covering `[window_start, window_end)` on `day`.
///
/// A remainder narrower than `step_minutes` at the end of the window is
/// dropped, so no slot ever ends after `window_end`. A window narrower than
/// one step yields no slots.
pub fn generate_slots<Tz>(
    tz: &Tz,
    day: NaiveDate,
    window_start: NaiveTime,
    window_end: NaiveTime,
    step_minutes: i64,
) -> ScheduleResult<Vec<TimeSlot>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if window_start >= window_end {
        return Err(ScheduleError::InvalidRange {
            start: window_start,
            end: window_end,
        });
    }
    if step_minutes <= 0 {
        return Err(ScheduleError::InvalidStep(step_minutes));
    }
    let step = Duration::try_minutes(step_minutes).ok_or(ScheduleError::InvalidStep(step_minutes))?;

    let end = day.and_time(window_end);
    let mut current = day.and_time(window_start);
    let mut slots = Vec::new();

    while let Some(next) = current.checked_add_signed(step) {
        if next > end {
            break;
        }

        let start = resolve_local(tz, current)?;
        let slot_end = resolve_local(tz, next)?;
        slots.push(TimeSlot {
            start,
            end: slot_end,
            label: clock_label(&start, tz),
        });

        current = next;
    }

    debug!(
        "Generated {} slots for {} ({} - {}, step {} min)",
        slots.len(),
        day,
        window_start.format("%H:%M"),
        window_end.format("%H:%M"),
        step_minutes
    );

    Ok(slots)
}

/// Generate slots for a working-hours window.
pub fn generate_slots_for_hours<Tz>(
    tz: &Tz,
    day: NaiveDate,
    hours: &WorkingHours,
    step_minutes: i64,
) -> ScheduleResult<Vec<TimeSlot>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    generate_slots(tz, day, hours.start, hours.end, step_minutes)
}
