use crate::calendar::{DayKind, WorkCalendar};
use crate::country::Country;
use crate::holidays::HolidayProvider;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outcome of walking back a number of working days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDayShift {
    pub date: NaiveDate,
    /// Holidays skipped on the way (weekends are not counted).
    pub impact_days: u32,
}

/// Holiday-aware backward walk over a country's working calendar.
pub struct BackwardPass<'a> {
    provider: &'a HolidayProvider,
}

impl<'a> BackwardPass<'a> {
    pub fn new(provider: &'a HolidayProvider) -> Self {
        Self { provider }
    }

    /// Step back from `start` until `working_days` working days have been
    /// consumed. The returned date is a working day whenever
    /// `working_days > 0`; with zero days `start` comes back unchanged.
    pub fn subtract_business_days(
        &self,
        start: NaiveDate,
        working_days: u32,
        country: Country,
    ) -> BusinessDayShift {
        let mut current = start;
        let mut days_left = working_days;
        let mut impact_days = 0;
        let mut calendar = WorkCalendar::load(self.provider, current.year(), country);

        while days_left > 0 {
            let previous = current;
            current = current - Duration::days(1);

            if current.year() != previous.year() {
                calendar.reload(self.provider, current.year());
            }

            match calendar.classify(current) {
                DayKind::Weekend => continue,
                DayKind::Holiday => {
                    trace!(date = %current, %country, "holiday skipped");
                    impact_days += 1;
                }
                DayKind::Working => days_left -= 1,
            }
        }

        BusinessDayShift {
            date: current,
            impact_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::{BufferPolicy, NoopHolidayCache};
    use std::sync::Arc;

    #[test]
    fn zero_days_is_identity() {
        let provider = HolidayProvider::new(BufferPolicy::default(), Arc::new(NoopHolidayCache));
        let start = NaiveDate::from_ymd_opt(2026, 7, 11).unwrap(); // Saturday
        let shift = BackwardPass::new(&provider).subtract_business_days(start, 0, Country::Vietnam);
        assert_eq!(shift.date, start);
        assert_eq!(shift.impact_days, 0);
    }
}
