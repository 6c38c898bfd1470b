/// Appointment selection.
///
/// Every function here borrows its input and returns references in input
/// order. Nothing fails: no match is an empty vector.

use crate::models::{Appointment, TimeSlot};
use crate::time::local_date;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

/// True iff the appointment shares at least one instant with
/// `[range_start, range_end)`. Touching endpoints do not count.
pub fn overlaps(apt: &Appointment, range_start: &DateTime<Utc>, range_end: &DateTime<Utc>) -> bool {
    apt.start_time < *range_end && apt.end_time > *range_start
}

/// True iff the appointment starts inside `[range_start, range_end)`.
///
/// Over contiguous slots this attributes each appointment to exactly one
/// slot, its first.
pub fn starts_within(
    apt: &Appointment,
    range_start: &DateTime<Utc>,
    range_end: &DateTime<Utc>,
) -> bool {
    *range_start <= apt.start_time && apt.start_time < *range_end
}

/// Appointments overlapping the slot.
pub fn appointments_in_slot<'a>(appointments: &'a [Appointment], slot: &TimeSlot) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|apt| overlaps(apt, &slot.start, &slot.end))
        .collect()
}

/// Appointments starting in the slot.
pub fn appointments_starting_in_slot<'a>(
    appointments: &'a [Appointment],
    slot: &TimeSlot,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|apt| starts_within(apt, &slot.start, &slot.end))
        .collect()
}

/// Appointments for `doctor_id` starting on `date` in the viewer's zone.
pub fn by_doctor_and_day<'a, Tz: TimeZone>(
    appointments: &'a [Appointment],
    doctor_id: &str,
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|apt| apt.doctor_id == doctor_id && local_date(&apt.start_time, tz) == date)
        .collect()
}

/// Appointments for `doctor_id` starting on any day from `week_start`
/// through `week_start + 6 days`, both ends included as whole days.
pub fn by_doctor_and_week<'a, Tz: TimeZone>(
    appointments: &'a [Appointment],
    doctor_id: &str,
    week_start: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Appointment> {
    let last_day = week_start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);

    appointments
        .iter()
        .filter(|apt| {
            let day = local_date(&apt.start_time, tz);
            apt.doctor_id == doctor_id && week_start <= day && day <= last_day
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentType;
    use chrono_tz::America::New_York;

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, minute, second).unwrap()
    }

    fn apt(id: &str, doctor: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Appointment {
        Appointment::new(doctor, "p1", start, end, AppointmentType::Checkup)
            .unwrap()
            .with_id(id)
    }

    fn slot(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeSlot {
        TimeSlot {
            start,
            end,
            label: String::new(),
        }
    }

    fn ids(found: &[&Appointment]) -> Vec<String> {
        found.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn multi_slot_appointment_starts_in_one_slot_only() {
        let a = apt("a1", "d1", at(10, 9, 0, 0), at(10, 9, 45, 0));

        let first = (at(10, 9, 0, 0), at(10, 9, 30, 0));
        assert!(overlaps(&a, &first.0, &first.1));
        assert!(starts_within(&a, &first.0, &first.1));

        let second = (at(10, 9, 30, 0), at(10, 10, 0, 0));
        assert!(overlaps(&a, &second.0, &second.1));
        assert!(!starts_within(&a, &second.0, &second.1));
    }

    #[test]
    fn touching_boundaries_do_not_overlap() {
        let a = apt("a1", "d1", at(10, 9, 0, 0), at(10, 9, 30, 0));
        assert!(!overlaps(&a, &at(10, 9, 30, 0), &at(10, 10, 0, 0)));
        assert!(!overlaps(&a, &at(10, 8, 30, 0), &at(10, 9, 0, 0)));
    }

    #[test]
    fn slot_selection_preserves_input_order() {
        let appointments = vec![
            apt("late", "d1", at(10, 9, 15, 0), at(10, 9, 45, 0)),
            apt("early", "d1", at(10, 9, 0, 0), at(10, 9, 20, 0)),
            apt("before", "d1", at(10, 8, 30, 0), at(10, 9, 10, 0)),
        ];
        let s = slot(at(10, 9, 0, 0), at(10, 9, 30, 0));

        assert_eq!(ids(&appointments_in_slot(&appointments, &s)), vec!["late", "early", "before"]);
        assert_eq!(ids(&appointments_starting_in_slot(&appointments, &s)), vec!["late", "early"]);
    }

    #[test]
    fn day_filter_matches_doctor_and_date() {
        let appointments = vec![
            apt("a1", "d1", at(10, 9, 0, 0), at(10, 9, 30, 0)),
            apt("a2", "d2", at(10, 9, 0, 0), at(10, 9, 30, 0)),
            apt("a3", "d1", at(11, 9, 0, 0), at(11, 9, 30, 0)),
            apt("a4", "d1", at(10, 23, 30, 0), at(11, 0, 15, 0)),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        assert_eq!(ids(&by_doctor_and_day(&appointments, "d1", day, &Utc)), vec!["a1", "a4"]);
    }

    #[test]
    fn day_filter_uses_viewer_zone() {
        // 01:00 UTC on the 11th is still the 10th in New York
        let appointments = vec![apt("a1", "d1", at(11, 1, 0, 0), at(11, 1, 30, 0))];
        let tenth = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let eleventh = NaiveDate::from_ymd_opt(2024, 6, 11).unwrap();

        assert_eq!(by_doctor_and_day(&appointments, "d1", tenth, &New_York).len(), 1);
        assert!(by_doctor_and_day(&appointments, "d1", eleventh, &New_York).is_empty());
        assert_eq!(by_doctor_and_day(&appointments, "d1", eleventh, &Utc).len(), 1);
    }

    #[test]
    fn week_filter_includes_whole_last_day() {
        // Week of Monday 2024-06-10
        let week_start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let appointments = vec![
            apt("sunday-before", "d1", at(9, 23, 59, 59), at(10, 0, 30, 0)),
            apt("monday-midnight", "d1", at(10, 0, 0, 0), at(10, 0, 30, 0)),
            apt("sunday-last-second", "d1", at(16, 23, 59, 59), at(17, 0, 30, 0)),
            apt("next-monday", "d1", at(17, 0, 0, 0), at(17, 0, 30, 0)),
            apt("other-doctor", "d2", at(12, 9, 0, 0), at(12, 9, 30, 0)),
        ];

        assert_eq!(
            ids(&by_doctor_and_week(&appointments, "d1", week_start, &Utc)),
            vec!["monday-midnight", "sunday-last-second"]
        );
    }

    #[test]
    fn unknown_doctor_or_empty_list_yields_nothing() {
        let appointments = vec![apt("a1", "d1", at(10, 9, 0, 0), at(10, 9, 30, 0))];
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        assert!(by_doctor_and_day(&appointments, "nobody", day, &Utc).is_empty());
        assert!(by_doctor_and_week(&appointments, "nobody", day, &Utc).is_empty());
        assert!(by_doctor_and_day(&[], "d1", day, &Utc).is_empty());
    }
}
