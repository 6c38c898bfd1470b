use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use medimate::filter::{appointments_starting_in_slot, by_doctor_and_day, by_doctor_and_week, overlaps, starts_within};
use medimate::slots::generate_slots;
use medimate::{Appointment, AppointmentType};
use proptest::prelude::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn minute_of_day(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap()
}

fn instant(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap() + Duration::minutes(offset_minutes)
}

fn appointment(index: usize, doctor: &str, start_minute: i64, length: i64) -> Appointment {
    Appointment::new(
        doctor,
        "p1",
        instant(start_minute),
        instant(start_minute + length),
        AppointmentType::ALL[index % AppointmentType::ALL.len()],
    )
    .unwrap()
    .with_id(format!("a{}", index))
}

fn appointments_strategy() -> impl Strategy<Value = Vec<Appointment>> {
    // Starts spread over three days so some land outside the queried day
    prop::collection::vec((0i64..4320, 1i64..180, prop::bool::ANY), 0..40).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, length, first_doctor))| {
                appointment(i, if first_doctor { "d1" } else { "d2" }, start, length)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn slots_are_contiguous_and_inside_window(
        start in 0u32..1200,
        width in 1u32..239,
        step in 1i64..=90,
    ) {
        let window_start = minute_of_day(start);
        let window_end = minute_of_day(start + width);
        let slots = generate_slots(&Utc, day(), window_start, window_end, step).unwrap();

        let end_instant = day().and_time(window_end).and_utc();
        prop_assert_eq!(slots.len() as i64, width as i64 / step);
        for slot in &slots {
            prop_assert!(slot.end <= end_instant);
            prop_assert_eq!(slot.duration(), Duration::minutes(step));
        }
        for pair in slots.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        if let Some(first) = slots.first() {
            prop_assert_eq!(first.start, day().and_time(window_start).and_utc());
        }
    }

    #[test]
    fn overlap_means_shared_instant(
        apt_start in 0i64..600,
        apt_len in 1i64..120,
        range_start in 0i64..600,
        range_len in 1i64..120,
    ) {
        let apt = appointment(0, "d1", apt_start, apt_len);
        let (from, to) = (instant(range_start), instant(range_start + range_len));

        let latest_start = apt.start_time.max(from);
        let earliest_end = apt.end_time.min(to);
        prop_assert_eq!(overlaps(&apt, &from, &to), latest_start < earliest_end);
        prop_assert_eq!(
            overlaps(&apt, &from, &to),
            apt.start_time < to && apt.end_time > from
        );
        if starts_within(&apt, &from, &to) {
            prop_assert!(overlaps(&apt, &from, &to));
        }
    }

    #[test]
    fn starts_within_partitions_across_slots(appointments in appointments_strategy()) {
        let slots = generate_slots(
            &Utc,
            day(),
            minute_of_day(8 * 60),
            minute_of_day(18 * 60),
            30,
        )
        .unwrap();
        let grid_start = slots[0].start;
        let grid_end = slots[slots.len() - 1].end;

        for apt in &appointments {
            let homes = slots
                .iter()
                .filter(|slot| starts_within(apt, &slot.start, &slot.end))
                .count();
            let inside = grid_start <= apt.start_time && apt.start_time < grid_end;
            prop_assert_eq!(homes, if inside { 1 } else { 0 });
        }

        let placed: usize = slots
            .iter()
            .map(|slot| appointments_starting_in_slot(&appointments, slot).len())
            .sum();
        let expected = appointments
            .iter()
            .filter(|a| grid_start <= a.start_time && a.start_time < grid_end)
            .count();
        prop_assert_eq!(placed, expected);
    }

    #[test]
    fn filters_are_idempotent_and_order_preserving(appointments in appointments_strategy()) {
        let before = appointments.clone();

        let first: Vec<String> = by_doctor_and_day(&appointments, "d1", day(), &Utc)
            .iter()
            .map(|a| a.id.clone())
            .collect();
        let second: Vec<String> = by_doctor_and_day(&appointments, "d1", day(), &Utc)
            .iter()
            .map(|a| a.id.clone())
            .collect();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&appointments, &before);

        // Results appear in the same relative order as the input
        let positions: Vec<usize> = first
            .iter()
            .filter_map(|id| appointments.iter().position(|a| &a.id == id))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let week_first = by_doctor_and_week(&appointments, "d1", day(), &Utc).len();
        let week_second = by_doctor_and_week(&appointments, "d1", day(), &Utc).len();
        prop_assert_eq!(week_first, week_second);
        prop_assert!(week_first >= first.len());
    }
}
