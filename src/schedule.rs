/// Schedule queries over the clinic directory.
///
/// This module provides the ScheduleService struct which answers "what
/// should doctor D see on this date and its week" by composing slot
/// generation with appointment filtering. Nothing is cached: every query
/// recomputes from the directory.

use crate::directory::Directory;
use crate::error::ScheduleResult;
use crate::filter::{by_doctor_and_day, by_doctor_and_week};
use crate::models::{Appointment, Doctor, TimeSlot, WorkingHours};
use crate::slots::generate_slots_for_hours;
use crate::time::{local_date, week_start};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt::Display;
use tracing::debug;

pub const DEFAULT_SLOT_MINUTES: i64 = 30;

/// Grid settings shared by every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSettings {
    pub step_minutes: i64,
    /// Window used when the doctor is not in the directory.
    pub default_hours: WorkingHours,
}

impl Default for SlotSettings {
    fn default() -> Self {
        SlotSettings {
            step_minutes: DEFAULT_SLOT_MINUTES,
            default_hours: WorkingHours::default(),
        }
    }
}

/// Everything the dashboard needs for one doctor and date.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    pub doctor: Option<Doctor>,
    /// The doctor's hours, or the default window for an unknown doctor.
    pub working_hours: WorkingHours,
    pub date: NaiveDate,
    pub day_appointments: Vec<Appointment>,
    pub week_start: NaiveDate,
    pub week_appointments: Vec<Appointment>,
    pub time_slots: Vec<TimeSlot>,
}

/// Schedule query facade.
pub struct ScheduleService<Tz: TimeZone> {
    pub directory: Directory,
    pub settings: SlotSettings,
    tz: Tz,
}

impl<Tz> ScheduleService<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(directory: Directory, tz: Tz, settings: SlotSettings) -> Self {
        ScheduleService {
            directory,
            settings,
            tz,
        }
    }

    /// The viewer's time zone.
    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Working hours for a doctor, falling back to the default window.
    pub fn working_hours_for(&self, doctor_id: &str) -> WorkingHours {
        self.directory
            .doctor(doctor_id)
            .map(|d| d.working_hours)
            .unwrap_or(self.settings.default_hours)
    }

    /// Build the schedule view for `doctor_id` on `date`.
    ///
    /// An unknown doctor is not an error: the view has no doctor, no
    /// appointments and a grid over the default window.
    pub fn query(&self, doctor_id: &str, date: NaiveDate) -> ScheduleResult<ScheduleView> {
        let doctor = self.directory.doctor(doctor_id).cloned();
        let working_hours = self.working_hours_for(doctor_id);
        let appointments = self.directory.appointments();

        let day_appointments: Vec<Appointment> =
            by_doctor_and_day(appointments, doctor_id, date, &self.tz)
                .into_iter()
                .cloned()
                .collect();

        let week_start = week_start(date);
        let week_appointments: Vec<Appointment> =
            by_doctor_and_week(appointments, doctor_id, week_start, &self.tz)
                .into_iter()
                .cloned()
                .collect();

        let time_slots =
            generate_slots_for_hours(&self.tz, date, &working_hours, self.settings.step_minutes)?;

        debug!(
            "Schedule for {} on {}: {} day / {} week appointments, {} slots{}",
            doctor_id,
            date,
            day_appointments.len(),
            week_appointments.len(),
            time_slots.len(),
            if doctor.is_none() { " (unknown doctor, default hours)" } else { "" }
        );

        Ok(ScheduleView {
            doctor,
            working_hours,
            date,
            day_appointments,
            week_start,
            week_appointments,
            time_slots,
        })
    }

    /// Same as [`query`](Self::query), taking the date of `instant` in the
    /// viewer's zone.
    pub fn query_at(&self, doctor_id: &str, instant: DateTime<Utc>) -> ScheduleResult<ScheduleView> {
        self.query(doctor_id, local_date(&instant, &self.tz))
    }
}
