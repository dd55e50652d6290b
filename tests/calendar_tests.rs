use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;
use ta_planner::{Country, DayKind, HolidayProvider, HolidaySet, WorkCalendar};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calendar_with(dates: &[NaiveDate]) -> WorkCalendar {
    let set = HolidaySet::new(2026, Country::Indonesia, dates.iter().copied().collect::<HashSet<_>>());
    WorkCalendar::new(Country::Indonesia, Arc::new(set))
}

#[test]
fn weekends_are_not_available() {
    let cal = calendar_with(&[]);
    // 2026-07-11 is a Saturday, 2026-07-12 a Sunday
    assert_eq!(cal.classify(d(2026, 7, 11)), DayKind::Weekend);
    assert_eq!(cal.classify(d(2026, 7, 12)), DayKind::Weekend);
    assert!(cal.is_available(d(2026, 7, 13)));
}

#[test]
fn weekend_wins_over_holiday() {
    let cal = calendar_with(&[d(2026, 8, 15), d(2026, 8, 17)]);
    assert_eq!(cal.classify(d(2026, 8, 15)), DayKind::Weekend);
    assert_eq!(cal.classify(d(2026, 8, 17)), DayKind::Holiday);
}

#[test]
fn reload_switches_holiday_year() {
    let provider = HolidayProvider::builtin();
    let mut cal = WorkCalendar::load(&provider, 2026, Country::Indonesia);
    assert_eq!(cal.country(), Country::Indonesia);
    assert_eq!(cal.holiday_year(), 2026);
    assert!(cal.holidays().contains(d(2026, 8, 17)));

    cal.reload(&provider, 2024);
    assert_eq!(cal.holiday_year(), 2024);
    assert!(cal.holidays().contains(d(2024, 8, 17)));
    assert!(!cal.holidays().contains(d(2026, 8, 17)));
}
