//! JSON data source: doctors, patients and appointments in one document.
//!
//! ```json
//! {
//!   "doctors": [{ "id": "d1", "name": "Dr. Sarah Chen", "specialty": "Cardiology",
//!                 "workingHours": { "start": "08:00", "end": "18:00" } }],
//!   "patients": [{ "id": "p1", "name": "Patient 1", "email": "patient1@example.com", "phone": "555-0001" }],
//!   "appointments": [{ "id": "a1", "doctorId": "d1", "patientId": "p1",
//!                      "startTime": "2024-06-10T09:00:00Z", "endTime": "2024-06-10T09:45:00Z",
//!                      "type": "checkup", "notes": "Follow-up required" }]
//! }
//! ```

use crate::directory::Directory;
use crate::error::ScheduleResult;
use crate::models::{Appointment, Doctor, Patient};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

impl Dataset {
    /// Parse and validate a dataset document.
    pub fn from_json_str(content: &str) -> ScheduleResult<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load a dataset file.
    pub fn load(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let dataset = Dataset::from_json_str(&content)?;

        info!(
            "Loaded {} doctors, {} patients, {} appointments from {}",
            dataset.doctors.len(),
            dataset.patients.len(),
            dataset.appointments.len(),
            path.display()
        );

        Ok(dataset)
    }

    /// Check every appointment. Working hours are checked while parsing.
    pub fn validate(&self) -> ScheduleResult<()> {
        self.appointments.iter().try_for_each(Appointment::validate)
    }

    pub fn to_json_string(&self) -> ScheduleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_directory(self) -> ScheduleResult<Directory> {
        Directory::new(self.doctors, self.patients, self.appointments)
    }
}
