/// Data models for the clinic schedule.
///
/// This module defines the records the rest of the crate works over:
/// - WorkingHours: a doctor's daily time-of-day window
/// - Doctor / Patient: directory entries, looked up by id
/// - AppointmentType: the closed set of visit kinds
/// - Appointment: a booked visit between two absolute instants
/// - TimeSlot: a generated grid cell, never persisted
/// - UserRole / ViewMode: dashboard state

use crate::error::{ScheduleError, ScheduleResult};
use crate::time::parse_time_of_day;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serde adapter for `HH:MM` times of day.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::time::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}

/// A daily window of wall-clock time. Always `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkingHoursRecord")]
pub struct WorkingHours {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

#[derive(Deserialize)]
struct WorkingHoursRecord {
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
}

impl TryFrom<WorkingHoursRecord> for WorkingHours {
    type Error = ScheduleError;

    fn try_from(record: WorkingHoursRecord) -> ScheduleResult<Self> {
        WorkingHours::new(record.start, record.end)
    }
}

impl WorkingHours {
    /// Create a window, rejecting empty or inverted ranges.
    pub fn new(start: NaiveTime, end: NaiveTime) -> ScheduleResult<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(WorkingHours { start, end })
    }

    /// Parse a window from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> ScheduleResult<Self> {
        WorkingHours::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    /// Length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl Default for WorkingHours {
    /// The generic 08:00–18:00 clinic day.
    fn default() -> Self {
        WorkingHours {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for WorkingHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// A doctor in the clinic directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub working_hours: WorkingHours,
}

impl Doctor {
    pub fn new(id: &str, name: &str, specialty: &str, working_hours: WorkingHours) -> Self {
        Doctor {
            id: id.to_string(),
            name: name.to_string(),
            specialty: specialty.to_string(),
            working_hours,
        }
    }
}

/// A patient in the clinic directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Patient {
    pub fn new(id: &str, name: &str, email: &str, phone: &str) -> Self {
        Patient {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }
}

/// Kind of visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    Checkup,
    Consultation,
    Followup,
    Procedure,
}

impl AppointmentType {
    pub const ALL: [AppointmentType; 4] = [
        AppointmentType::Checkup,
        AppointmentType::Consultation,
        AppointmentType::Followup,
        AppointmentType::Procedure,
    ];

    /// Convert a string to an AppointmentType.
    pub fn from_string(value: &str) -> ScheduleResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "checkup" => Ok(AppointmentType::Checkup),
            "consultation" => Ok(AppointmentType::Consultation),
            "followup" | "follow-up" => Ok(AppointmentType::Followup),
            "procedure" => Ok(AppointmentType::Procedure),
            _ => Err(ScheduleError::Parse(format!(
                "Invalid appointment type: '{}'. Must be one of: checkup, consultation, followup, procedure",
                value
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AppointmentType::Checkup => "checkup",
            AppointmentType::Consultation => "consultation",
            AppointmentType::Followup => "followup",
            AppointmentType::Procedure => "procedure",
        }
    }

    /// Human-readable label, as shown in the schedule legend.
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::Checkup => "Checkup",
            AppointmentType::Consultation => "Consultation",
            AppointmentType::Followup => "Follow-up",
            AppointmentType::Procedure => "Procedure",
        }
    }
}

/// A booked appointment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Create a new appointment with a generated id.
    pub fn new(
        doctor_id: &str,
        patient_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        kind: AppointmentType,
    ) -> ScheduleResult<Self> {
        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            doctor_id: doctor_id.to_string(),
            patient_id: patient_id.to_string(),
            start_time,
            end_time,
            kind,
            notes: None,
        };
        appointment.validate()?;
        Ok(appointment)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check the record invariants. Deserialized records bypass `new`.
    pub fn validate(&self) -> ScheduleResult<()> {
        let invalid = |reason: &str| ScheduleError::InvalidAppointment {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.is_empty() {
            return Err(invalid("id cannot be empty"));
        }
        if self.doctor_id.is_empty() {
            return Err(invalid("doctor id cannot be empty"));
        }
        if self.end_time <= self.start_time {
            return Err(invalid("end time must be after start time"));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// A generated half-open interval `[start, end)` used as a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Presentation only, e.g. `9:00 AM`.
    pub label: String,
}

impl TimeSlot {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check if an instant falls within this slot.
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        &self.start <= instant && instant < &self.end
    }
}

/// Who is looking at the dashboard. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    FrontDesk,
    Doctor,
}

impl UserRole {
    pub fn from_string(value: &str) -> ScheduleResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "frontdesk" | "front-desk" | "front desk" => Ok(UserRole::FrontDesk),
            "doctor" => Ok(UserRole::Doctor),
            _ => Err(ScheduleError::Parse(format!(
                "Invalid role: '{}'. Must be one of: frontdesk, doctor",
                value
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UserRole::FrontDesk => "Front Desk Staff",
            UserRole::Doctor => "Doctor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserRole::FrontDesk => "Can view schedules for all doctors.",
            UserRole::Doctor => "Can view only the selected doctor's schedule.",
        }
    }

    /// Front desk staff may switch between doctors; a doctor may not.
    pub fn can_select_doctor(&self) -> bool {
        matches!(self, UserRole::FrontDesk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Day,
    Week,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Day => ViewMode::Week,
            ViewMode::Week => ViewMode::Day,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewMode::Day => "Day View",
            ViewMode::Week => "Week View",
        }
    }
}
