/// Day and week grids built from a schedule view.
///
/// Each appointment is placed in the slot where it starts and nowhere else,
/// so a 45 minute visit over 30 minute slots is shown once.

use crate::directory::Directory;
use crate::error::ScheduleResult;
use crate::filter::starts_within;
use crate::models::{Appointment, AppointmentType, TimeSlot, WorkingHours};
use crate::schedule::{ScheduleService, ScheduleView};
use crate::slots::generate_slots_for_hours;
use crate::time::{clock_label, week_days};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt::Display;

/// Position of `now` inside the slot as a fraction in `[0, 1)`, if it falls
/// inside at all.
pub fn now_marker(slot: &TimeSlot, now: &DateTime<Utc>) -> Option<f64> {
    if !slot.contains(now) {
        return None;
    }
    let width = slot.duration().num_milliseconds();
    if width <= 0 {
        return None;
    }
    Some((*now - slot.start).num_milliseconds() as f64 / width as f64)
}

fn starting_in(appointments: &[Appointment], slot: &TimeSlot) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|apt| starts_within(apt, &slot.start, &slot.end))
        .cloned()
        .collect()
}

#[derive(Debug, Clone)]
pub struct SlotRow {
    pub slot: TimeSlot,
    pub appointments: Vec<Appointment>,
    pub now_marker: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct DayLayout {
    pub rows: Vec<SlotRow>,
}

impl DayLayout {
    pub fn build(slots: &[TimeSlot], appointments: &[Appointment], now: Option<DateTime<Utc>>) -> Self {
        let rows = slots
            .iter()
            .map(|slot| SlotRow {
                slot: slot.clone(),
                appointments: starting_in(appointments, slot),
                now_marker: now.as_ref().and_then(|n| now_marker(slot, n)),
            })
            .collect();

        DayLayout { rows }
    }

    /// Appointments placed anywhere in the grid.
    pub fn placed_count(&self) -> usize {
        self.rows.iter().map(|r| r.appointments.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub appointments: Vec<Appointment>,
    pub now_marker: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct WeekRow {
    pub label: String,
    pub cells: Vec<WeekCell>,
}

/// Seven day columns, Monday first, by one row per slot.
#[derive(Debug, Clone)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<WeekRow>,
}

impl WeekLayout {
    pub fn build<Tz>(
        tz: &Tz,
        week_start: NaiveDate,
        hours: &WorkingHours,
        step_minutes: i64,
        appointments: &[Appointment],
        now: Option<DateTime<Utc>>,
    ) -> ScheduleResult<Self>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let days = week_days(week_start);
        let day_slots = days
            .iter()
            .map(|day| generate_slots_for_hours(tz, *day, hours, step_minutes))
            .collect::<ScheduleResult<Vec<_>>>()?;

        let row_count = day_slots.iter().map(Vec::len).min().unwrap_or(0);
        let rows = (0..row_count)
            .map(|i| WeekRow {
                label: day_slots[0][i].label.clone(),
                cells: days
                    .iter()
                    .zip(&day_slots)
                    .map(|(date, slots)| {
                        let slot = &slots[i];
                        WeekCell {
                            date: *date,
                            slot: slot.clone(),
                            appointments: starting_in(appointments, slot),
                            now_marker: now.as_ref().and_then(|n| now_marker(slot, n)),
                        }
                    })
                    .collect(),
            })
            .collect();

        Ok(WeekLayout {
            week_start,
            days,
            rows,
        })
    }

    pub fn placed_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .map(|c| c.appointments.len())
            .sum()
    }
}

impl<Tz> ScheduleService<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn day_layout(&self, view: &ScheduleView, now: Option<DateTime<Utc>>) -> DayLayout {
        DayLayout::build(&view.time_slots, &view.day_appointments, now)
    }

    pub fn week_layout(&self, view: &ScheduleView, now: Option<DateTime<Utc>>) -> ScheduleResult<WeekLayout> {
        WeekLayout::build(
            self.timezone(),
            view.week_start,
            &view.working_hours,
            self.settings.step_minutes,
            &view.week_appointments,
            now,
        )
    }

    pub fn card(&self, appointment: &Appointment) -> AppointmentCard {
        AppointmentCard::new(appointment, &self.directory, self.timezone())
    }
}

/// What a single appointment shows in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentCard {
    pub appointment_id: String,
    pub patient_name: String,
    pub duration_minutes: i64,
    pub kind: AppointmentType,
    pub start_label: String,
    pub notes: Option<String>,
}

impl AppointmentCard {
    pub fn new<Tz>(appointment: &Appointment, directory: &Directory, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        AppointmentCard {
            appointment_id: appointment.id.clone(),
            patient_name: directory.patient_name(&appointment.patient_id).to_string(),
            duration_minutes: appointment.duration_minutes(),
            kind: appointment.kind,
            start_label: clock_label(&appointment.start_time, tz),
            notes: appointment.notes.clone(),
        }
    }
}

impl std::fmt::Display for AppointmentCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} min) {} {}",
            self.patient_name,
            self.duration_minutes,
            self.kind.label(),
            self.start_label
        )?;
        if let Some(notes) = &self.notes {
            write!(f, " - {}", notes)?;
        }
        Ok(())
    }
}

/// "3 appointments scheduled", "1 appointment scheduled".
pub fn scheduled_summary(count: usize) -> String {
    format!(
        "{} appointment{} scheduled",
        count,
        if count == 1 { "" } else { "s" }
    )
}
