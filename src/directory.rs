/// Clinic directory: doctors, patients and the appointment book.
///
/// Doctors and patients are keyed by id. Lookups return `None` on a miss;
/// callers decide how to present absence.

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{Appointment, Doctor, Patient};
use std::collections::HashMap;

pub const UNKNOWN_PATIENT: &str = "Unknown Patient";

#[derive(Debug, Clone, Default)]
pub struct Directory {
    doctors: HashMap<String, Doctor>,
    doctor_order: Vec<String>,
    patients: HashMap<String, Patient>,
    appointments: Vec<Appointment>,
}

impl Directory {
    /// Build a directory, rejecting duplicate doctor or patient ids.
    ///
    /// Appointments are kept in the order given.
    pub fn new(
        doctors: Vec<Doctor>,
        patients: Vec<Patient>,
        appointments: Vec<Appointment>,
    ) -> ScheduleResult<Self> {
        let mut directory = Directory {
            appointments,
            ..Directory::default()
        };

        for doctor in doctors {
            if directory.doctors.contains_key(&doctor.id) {
                return Err(ScheduleError::DuplicateId {
                    kind: "doctor",
                    id: doctor.id,
                });
            }
            directory.doctor_order.push(doctor.id.clone());
            directory.doctors.insert(doctor.id.clone(), doctor);
        }

        for patient in patients {
            if directory.patients.contains_key(&patient.id) {
                return Err(ScheduleError::DuplicateId {
                    kind: "patient",
                    id: patient.id,
                });
            }
            directory.patients.insert(patient.id.clone(), patient);
        }

        Ok(directory)
    }

    /// All doctors, in the order they were supplied.
    pub fn doctors(&self) -> Vec<&Doctor> {
        self.doctor_order
            .iter()
            .filter_map(|id| self.doctors.get(id))
            .collect()
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.get(doctor_id)
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    /// Patient display name, or "Unknown Patient" when the id is not on file.
    pub fn patient_name(&self, patient_id: &str) -> &str {
        self.patient(patient_id)
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN_PATIENT)
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }
}

impl std::fmt::Display for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Directory(doctors={}, patients={}, appointments={})",
            self.doctors.len(),
            self.patients.len(),
            self.appointments.len()
        )
    }
}
