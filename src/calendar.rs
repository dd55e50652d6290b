use crate::country::Country;
use crate::holidays::{HolidayProvider, HolidaySet};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;
use std::sync::Arc;

/// How a calendar day counts against a lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Weekend,
    Holiday,
    Working,
}

/// Factory working calendar for one country: Monday–Friday work week plus the
/// country's holiday set for the year currently being walked.
#[derive(Debug, Clone)]
pub struct WorkCalendar {
    country: Country,
    holidays: Arc<HolidaySet>,
    non_working_days: HashSet<Weekday>,
}

impl WorkCalendar {
    pub fn new(country: Country, holidays: Arc<HolidaySet>) -> Self {
        Self {
            country,
            holidays,
            non_working_days: HashSet::from([Weekday::Sat, Weekday::Sun]),
        }
    }

    /// Calendar backed by the provider's holidays for `year`.
    pub fn load(provider: &HolidayProvider, year: i32, country: Country) -> Self {
        Self::new(country, provider.get_holidays(year, country))
    }

    pub fn country(&self) -> Country {
        self.country
    }

    /// Year the loaded holiday set was requested for.
    pub fn holiday_year(&self) -> i32 {
        self.holidays.year()
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Swap in the holiday set for another year.
    pub fn reload(&mut self, provider: &HolidayProvider, year: i32) {
        self.holidays = provider.get_holidays(year, self.country);
    }

    /// Weekends win over holidays so a weekend never counts as lost time.
    pub fn classify(&self, date: NaiveDate) -> DayKind {
        if self.non_working_days.contains(&date.weekday()) {
            DayKind::Weekend
        } else if self.holidays.contains(date) {
            DayKind::Holiday
        } else {
            DayKind::Working
        }
    }

    /// True on a weekday that is not in the holiday set.
    pub fn is_available(&self, date: NaiveDate) -> bool {
        self.classify(date) == DayKind::Working
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekend_takes_precedence_over_holiday() {
        // 2026-02-21 is a Saturday inside the Tet buffer.
        let holidays = HolidaySet::new(2026, Country::Vietnam, HashSet::from([d(2026, 2, 21)]));
        let cal = WorkCalendar::new(Country::Vietnam, Arc::new(holidays));
        assert_eq!(cal.classify(d(2026, 2, 21)), DayKind::Weekend);
    }

    #[test]
    fn buffered_weekday_is_not_available() {
        let holidays = HolidaySet::new(2026, Country::China, HashSet::from([d(2026, 5, 1)]));
        let cal = WorkCalendar::new(Country::China, Arc::new(holidays));
        assert_eq!(cal.classify(d(2026, 5, 1)), DayKind::Holiday);
        assert!(!cal.is_available(d(2026, 5, 1)));
        assert!(cal.is_available(d(2026, 4, 30)));
    }
}
