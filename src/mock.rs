//! Synthetic clinic data for demos.
//!
//! Randomness comes from the caller's `Rng`, so a seeded generator gives a
//! repeatable data set. Appointments for one doctor on one day never
//! overlap and always end within working hours.

use crate::directory::Directory;
use crate::error::ScheduleResult;
use crate::models::{Appointment, AppointmentType, Doctor, Patient, WorkingHours};
use crate::time::resolve_local;
use chrono::{Days, Duration, NaiveDate, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

pub const DURATIONS_MINUTES: [i64; 3] = [30, 45, 60];
pub const GAPS_MINUTES: [i64; 4] = [10, 15, 20, 30];
pub const DEFAULT_PATIENT_COUNT: usize = 50;
pub const DEFAULT_DAYS: u32 = 14;

const FOLLOW_UP_NOTE: &str = "Follow-up required";

/// The three sample doctors.
pub fn sample_doctors() -> ScheduleResult<Vec<Doctor>> {
    Ok(vec![
        Doctor::new("d1", "Dr. Sarah Chen", "Cardiology", WorkingHours::parse("08:00", "18:00")?),
        Doctor::new(
            "d2",
            "Dr. Michael Rodriguez",
            "Pediatrics",
            WorkingHours::parse("09:00", "17:00")?,
        ),
        Doctor::new("d3", "Dr. Emily Johnson", "Orthopedics", WorkingHours::parse("08:00", "16:00")?),
    ])
}

/// Patients `p1..=pN`.
pub fn sample_patients(count: usize) -> Vec<Patient> {
    (1..=count)
        .map(|n| {
            Patient::new(
                &format!("p{}", n),
                &format!("Patient {}", n),
                &format!("patient{}@example.com", n),
                &format!("555-{:04}", n),
            )
        })
        .collect()
}

/// Generate back-to-back appointments for every doctor on `days`
/// consecutive days starting at `first_day`.
///
/// Each doctor-day gets 8 to 12 attempts. An attempt picks a duration that
/// still ends by closing time, then the cursor moves on by a random gap.
/// The result is sorted by start time.
pub fn generate_appointments<R, Tz>(
    rng: &mut R,
    tz: &Tz,
    doctors: &[Doctor],
    patients: &[Patient],
    first_day: NaiveDate,
    days: u32,
) -> Vec<Appointment>
where
    R: Rng + ?Sized,
    Tz: TimeZone,
{
    let mut appointments = Vec::new();
    if patients.is_empty() {
        warn!("No patients available, skipping mock appointment generation");
        return appointments;
    }

    for day_index in 0..days {
        let Some(day) = first_day.checked_add_days(Days::new(day_index as u64)) else {
            break;
        };

        for doctor in doctors {
            let closing = day.and_time(doctor.working_hours.end);
            let mut current = day.and_time(doctor.working_hours.start);
            let attempts: usize = rng.gen_range(8..=12);

            for i in 0..attempts {
                let fitting: Vec<i64> = DURATIONS_MINUTES
                    .iter()
                    .copied()
                    .filter(|minutes| current + Duration::minutes(*minutes) <= closing)
                    .collect();
                let Some(&minutes) = fitting.choose(rng) else {
                    break;
                };
                let end = current + Duration::minutes(minutes);
                let kind = AppointmentType::ALL[(i + day_index as usize) % AppointmentType::ALL.len()];
                let patient_id = patients
                    .choose(rng)
                    .map(|p| p.id.clone())
                    .unwrap_or_default();
                let notes = rng.gen_bool(0.5).then(|| FOLLOW_UP_NOTE.to_string());

                match (resolve_local(tz, current), resolve_local(tz, end)) {
                    (Ok(start_time), Ok(end_time)) if start_time < end_time => {
                        appointments.push(Appointment {
                            id: format!("a{}", appointments.len() + 1),
                            doctor_id: doctor.id.clone(),
                            patient_id,
                            start_time,
                            end_time,
                            kind,
                            notes,
                        });
                    }
                    _ => warn!(
                        "Skipping mock appointment for {} at {}: not a valid local time",
                        doctor.id, current
                    ),
                }

                let gap = GAPS_MINUTES.choose(rng).copied().unwrap_or(GAPS_MINUTES[0]);
                current = end + Duration::minutes(gap);
                if current > closing {
                    break;
                }
            }
        }
    }

    appointments.sort_by_key(|a| a.start_time);

    info!(
        "Generated {} mock appointments for {} doctors over {} days from {}",
        appointments.len(),
        doctors.len(),
        days,
        first_day
    );

    appointments
}

/// Sample doctors, fifty patients and generated appointments.
pub fn sample_directory<R, Tz>(
    rng: &mut R,
    tz: &Tz,
    first_day: NaiveDate,
    days: u32,
) -> ScheduleResult<Directory>
where
    R: Rng + ?Sized,
    Tz: TimeZone,
{
    let doctors = sample_doctors()?;
    let patients = sample_patients(DEFAULT_PATIENT_COUNT);
    let appointments = generate_appointments(rng, tz, &doctors, &patients, first_day, days);
    Directory::new(doctors, patients, appointments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::local_date;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn first_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn generate(seed: u64) -> (Vec<Doctor>, Vec<Appointment>) {
        let doctors = sample_doctors().unwrap();
        let patients = sample_patients(DEFAULT_PATIENT_COUNT);
        let mut rng = StdRng::seed_from_u64(seed);
        let appointments =
            generate_appointments(&mut rng, &Utc, &doctors, &patients, first_day(), DEFAULT_DAYS);
        (doctors, appointments)
    }

    #[test]
    fn sample_fixtures_match_clinic() {
        let doctors = sample_doctors().unwrap();
        assert_eq!(doctors.len(), 3);
        assert_eq!(doctors[1].working_hours.to_string(), "09:00 - 17:00");

        let patients = sample_patients(3);
        assert_eq!(patients[2].id, "p3");
        assert_eq!(patients[2].phone, "555-0003");
    }

    #[test]
    fn appointments_never_overlap_per_doctor() {
        let (doctors, appointments) = generate(42);
        assert!(!appointments.is_empty());

        for doctor in &doctors {
            let mine: Vec<&Appointment> =
                appointments.iter().filter(|a| a.doctor_id == doctor.id).collect();
            for pair in mine.windows(2) {
                assert!(
                    pair[0].end_time + Duration::minutes(10) <= pair[1].start_time,
                    "{} and {} are too close",
                    pair[0].id,
                    pair[1].id
                );
            }
        }
    }

    #[test]
    fn appointments_respect_working_hours_and_durations() {
        let (doctors, appointments) = generate(7);

        for apt in &appointments {
            let doctor = doctors.iter().find(|d| d.id == apt.doctor_id).unwrap();
            let day = local_date(&apt.start_time, &Utc);
            assert!(apt.start_time.time() >= doctor.working_hours.start);
            assert!(apt.end_time <= day.and_time(doctor.working_hours.end).and_utc());
            assert!(DURATIONS_MINUTES.contains(&apt.duration_minutes()));
        }
    }

    #[test]
    fn at_most_twelve_per_doctor_day() {
        let (_, appointments) = generate(3);
        let mut counts = std::collections::HashMap::new();
        for apt in &appointments {
            *counts
                .entry((apt.doctor_id.clone(), local_date(&apt.start_time, &Utc)))
                .or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 3 * DEFAULT_DAYS as usize);
        assert!(counts.values().all(|&n| (1..=12).contains(&n)));
    }

    #[test]
    fn output_is_sorted_with_unique_ids() {
        let (_, appointments) = generate(11);
        for pair in appointments.windows(2) {
            assert!(pair[0].start_time <= pair[1].start_time);
        }
        let ids: HashSet<&str> = appointments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), appointments.len());
    }

    #[test]
    fn same_seed_same_data() {
        let (_, first) = generate(99);
        let (_, second) = generate(99);
        assert_eq!(first, second);
    }

    #[test]
    fn no_patients_no_appointments() {
        let doctors = sample_doctors().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let appointments = generate_appointments(&mut rng, &Utc, &doctors, &[], first_day(), 3);
        assert!(appointments.is_empty());
    }

    #[test]
    fn sample_directory_is_consistent() {
        let mut rng = StdRng::seed_from_u64(5);
        let directory = sample_directory(&mut rng, &Utc, first_day(), 2).unwrap();
        assert_eq!(directory.doctors().len(), 3);
        assert_eq!(directory.patient_count(), DEFAULT_PATIENT_COUNT);
        assert!(directory
            .appointments()
            .iter()
            .all(|a| directory.patient(&a.patient_id).is_some()));
    }
}
