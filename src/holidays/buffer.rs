use super::{HolidayCategory, RawHoliday};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Extra non-working calendar days around a holiday category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferRule {
    pub category: HolidayCategory,
    pub days_before: u32,
    pub days_after: u32,
}

impl BufferRule {
    pub fn symmetric(category: HolidayCategory, days: u32) -> Self {
        Self {
            category,
            days_before: days,
            days_after: days,
        }
    }
}

/// Mapping from holiday category to buffer rule. Categories without a rule
/// contribute only their own date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferPolicy {
    rules: BTreeMap<HolidayCategory, BufferRule>,
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self::new(Self::default_rules())
    }
}

impl BufferPolicy {
    /// Factories in the region close for roughly a working week either side
    /// of the big festivals.
    pub const MEGA_HOLIDAY_BUFFER_DAYS: u32 = 5;

    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = BufferRule>,
    {
        // Later rules for the same category replace earlier ones.
        let rules = rules.into_iter().map(|r| (r.category, r)).collect();
        Self { rules }
    }

    pub fn none() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    pub fn default_rules() -> Vec<BufferRule> {
        [
            HolidayCategory::NewYear,
            HolidayCategory::LunarNewYear,
            HolidayCategory::KhmerNewYear,
            HolidayCategory::IslamicNewYear,
            HolidayCategory::PchumBen,
        ]
        .into_iter()
        .map(|c| BufferRule::symmetric(c, Self::MEGA_HOLIDAY_BUFFER_DAYS))
        .collect()
    }

    pub fn rule_for(&self, category: HolidayCategory) -> Option<&BufferRule> {
        self.rules.get(&category)
    }

    /// Insert the holiday and its buffer days into `dates`.
    pub fn expand_into(&self, holiday: &RawHoliday, dates: &mut HashSet<NaiveDate>) {
        dates.insert(holiday.date);
        let Some(rule) = self.rule_for(holiday.category) else {
            return;
        };
        for offset in 1..=u64::from(rule.days_before) {
            if let Some(date) = holiday.date.checked_sub_days(Days::new(offset)) {
                dates.insert(date);
            }
        }
        for offset in 1..=u64::from(rule.days_after) {
            if let Some(date) = holiday.date.checked_add_days(Days::new(offset)) {
                dates.insert(date);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn default_policy_buffers_lunar_new_year_by_five_days() {
        let policy = BufferPolicy::default();
        let mut dates = HashSet::new();
        let tet = RawHoliday::new(d(2026, 2, 17), "Tet", HolidayCategory::LunarNewYear);
        policy.expand_into(&tet, &mut dates);
        assert_eq!(dates.len(), 11);
        assert!(dates.contains(&d(2026, 2, 12)));
        assert!(dates.contains(&d(2026, 2, 22)));
        assert!(!dates.contains(&d(2026, 2, 23)));
    }

    #[test]
    fn ordinary_holidays_are_not_buffered() {
        let policy = BufferPolicy::default();
        let mut dates = HashSet::new();
        let labour = RawHoliday::new(d(2026, 5, 1), "Labour Day", HolidayCategory::Other);
        policy.expand_into(&labour, &mut dates);
        assert_eq!(dates.len(), 1);
    }

    #[test]
    fn asymmetric_rule_and_override() {
        let policy = BufferPolicy::new([
            BufferRule::symmetric(HolidayCategory::PchumBen, 5),
            BufferRule {
                category: HolidayCategory::PchumBen,
                days_before: 2,
                days_after: 0,
            },
        ]);
        let mut dates = HashSet::new();
        let pchum = RawHoliday::new(d(2025, 9, 22), "Pchum Ben", HolidayCategory::PchumBen);
        policy.expand_into(&pchum, &mut dates);
        assert_eq!(dates.len(), 3);
        assert!(dates.contains(&d(2025, 9, 20)));
        assert!(!dates.contains(&d(2025, 9, 23)));
    }
}
