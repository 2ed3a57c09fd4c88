use chrono::NaiveDate;
use uuid::Uuid;

use doctor_cell::models::{DayOfWeek, Doctor};
use doctor_cell::services::availability::{free_slots, is_date_bookable, next_bookable_date};

fn doctor_with_days(days: Vec<DayOfWeek>) -> Doctor {
    Doctor {
        id: Uuid::from_u128(42),
        full_name: "Dr. X".to_string(),
        specialty: "Médecine générale".to_string(),
        city: "Paris".to_string(),
        address: "1 Rue Test".to_string(),
        phone: "+33 1 00 00 00 00".to_string(),
        rating: 4.0,
        available_days: days,
        time_slots: vec!["09:00".into(), "09:30".into(), "10:00".into()],
        consultation_price: 30.0,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2025-01-06 is a Monday; the week runs Mon 6 .. Sun 12.

#[test]
fn past_dates_are_never_bookable() {
    let doctor = doctor_with_days(vec![DayOfWeek::Lundi]);
    let today = date(2025, 1, 8);

    // Previous Monday is a working day, but in the past.
    assert!(!is_date_bookable(Some(&doctor), date(2025, 1, 6), today));
    assert!(!is_date_bookable(Some(&doctor), date(2024, 12, 30), today));
}

#[test]
fn same_day_is_bookable_on_a_working_day() {
    let doctor = doctor_with_days(vec![DayOfWeek::Mercredi]);
    let today = date(2025, 1, 8); // a Wednesday

    assert!(is_date_bookable(Some(&doctor), today, today));
}

#[test]
fn non_working_weekday_is_rejected() {
    let doctor = doctor_with_days(vec![DayOfWeek::Lundi, DayOfWeek::Mardi]);
    let today = date(2025, 1, 6);

    assert!(is_date_bookable(Some(&doctor), date(2025, 1, 6), today)); // Monday
    assert!(is_date_bookable(Some(&doctor), date(2025, 1, 7), today)); // Tuesday
    assert!(!is_date_bookable(Some(&doctor), date(2025, 1, 9), today)); // Thursday
    assert!(!is_date_bookable(Some(&doctor), date(2025, 1, 11), today)); // Saturday
}

#[test]
fn missing_doctor_fails_closed() {
    let today = date(2025, 1, 6);
    assert!(!is_date_bookable(None, date(2025, 1, 6), today));
}

#[test]
fn next_bookable_skips_to_following_monday() {
    // Doctor works Lundi/Mardi, today is a Wednesday: the next bookable
    // date must be the following Monday, never Thursday through Sunday.
    let doctor = doctor_with_days(vec![DayOfWeek::Lundi, DayOfWeek::Mardi]);
    let wednesday = date(2025, 1, 8);

    let next = next_bookable_date(&doctor, wednesday).unwrap();
    assert_eq!(next, date(2025, 1, 13));
}

#[test]
fn next_bookable_is_today_when_today_matches() {
    let doctor = doctor_with_days(vec![DayOfWeek::Lundi]);
    let monday = date(2025, 1, 6);

    assert_eq!(next_bookable_date(&doctor, monday), Some(monday));
}

#[test]
fn next_bookable_is_none_without_working_days() {
    let doctor = doctor_with_days(vec![]);
    assert_eq!(next_bookable_date(&doctor, date(2025, 1, 6)), None);
}

#[test]
fn free_slots_exclude_booked_labels() {
    let doctor = doctor_with_days(vec![DayOfWeek::Lundi]);
    let monday = date(2025, 1, 6);

    let booked = vec!["09:30".to_string()];
    let free = free_slots(&doctor, monday, monday, &booked);
    assert_eq!(free, vec!["09:00".to_string(), "10:00".to_string()]);
}

#[test]
fn free_slots_empty_on_unbookable_date() {
    let doctor = doctor_with_days(vec![DayOfWeek::Lundi]);
    let monday = date(2025, 1, 6);

    // Tuesday is not a working day for this doctor.
    assert!(free_slots(&doctor, date(2025, 1, 7), monday, &[]).is_empty());
    // Past Monday also yields nothing.
    assert!(free_slots(&doctor, date(2024, 12, 30), monday, &[]).is_empty());
}
