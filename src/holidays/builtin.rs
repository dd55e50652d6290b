//! Bundled public-holiday calendars for the supported production countries.
//!
//! Solar holidays are generated from rules for any year. Lunar and Islamic
//! holidays come from dated tables, so every country has a coverage window;
//! outside it only the rule-based holidays are returned.

use super::{HolidayCategory, HolidaySource, RawHoliday};
use crate::country::Country;
use crate::error::HolidaySourceError;
use chrono::{Datelike, Duration, NaiveDate};
use std::ops::RangeInclusive;
use tracing::warn;

type Ymd = (i32, u32, u32);

enum HolidayRule {
    /// Same month/day every year.
    Fixed { month: u32, day: u32 },
    /// Days relative to (Western) Easter Sunday.
    Easter(i64),
    /// Days relative to the first day of the lunar new year.
    LunarNewYear(i64),
    /// Explicit dates, one or more per year.
    Dated(&'static [Ymd]),
}

impl HolidayRule {
    fn needs_table(&self) -> bool {
        matches!(self, HolidayRule::LunarNewYear(_) | HolidayRule::Dated(_))
    }
}

struct HolidayDef {
    rule: HolidayRule,
    name: &'static str,
    category: HolidayCategory,
}

const fn def(rule: HolidayRule, name: &'static str, category: HolidayCategory) -> HolidayDef {
    HolidayDef {
        rule,
        name,
        category,
    }
}

const fn fixed(month: u32, day: u32) -> HolidayRule {
    HolidayRule::Fixed { month, day }
}

use HolidayCategory::{IslamicNewYear, KhmerNewYear, LunarNewYear, NewYear, Other, PchumBen};
use HolidayRule::{Dated, Easter};

const LUNAR_NEW_YEAR: &[Ymd] = &[
    (2022, 2, 1),
    (2023, 1, 22),
    (2024, 2, 10),
    (2025, 1, 29),
    (2026, 2, 17),
    (2027, 2, 6),
    (2028, 1, 26),
];

const QINGMING: &[Ymd] = &[
    (2022, 4, 5),
    (2023, 4, 5),
    (2024, 4, 4),
    (2025, 4, 4),
    (2026, 4, 5),
    (2027, 4, 5),
    (2028, 4, 4),
];

const DRAGON_BOAT: &[Ymd] = &[
    (2022, 6, 3),
    (2023, 6, 22),
    (2024, 6, 10),
    (2025, 5, 31),
    (2026, 6, 19),
    (2027, 6, 9),
    (2028, 5, 28),
];

const MID_AUTUMN: &[Ymd] = &[
    (2022, 9, 10),
    (2023, 9, 29),
    (2024, 9, 17),
    (2025, 10, 6),
    (2026, 9, 25),
    (2027, 9, 15),
    (2028, 10, 3),
];

const HUNG_KINGS: &[Ymd] = &[
    (2022, 4, 10),
    (2023, 4, 29),
    (2024, 4, 18),
    (2025, 4, 7),
    (2026, 4, 26),
    (2027, 4, 16),
    (2028, 4, 4),
];

const ISRA_MIRAJ: &[Ymd] = &[
    (2022, 2, 28),
    (2023, 2, 18),
    (2024, 2, 8),
    (2025, 1, 27),
    (2026, 1, 16),
    (2027, 1, 5),
    (2028, 12, 14),
];

const NYEPI: &[Ymd] = &[
    (2022, 3, 3),
    (2023, 3, 22),
    (2024, 3, 11),
    (2025, 3, 29),
    (2026, 3, 19),
    (2027, 3, 8),
    (2028, 3, 26),
];

const EID_AL_FITR: &[Ymd] = &[
    (2022, 5, 2),
    (2022, 5, 3),
    (2023, 4, 22),
    (2023, 4, 23),
    (2024, 4, 10),
    (2024, 4, 11),
    (2025, 3, 31),
    (2025, 4, 1),
    (2026, 3, 20),
    (2026, 3, 21),
    (2027, 3, 10),
    (2027, 3, 11),
    (2028, 2, 26),
    (2028, 2, 27),
];

const VESAK: &[Ymd] = &[
    (2022, 5, 16),
    (2023, 6, 4),
    (2024, 5, 23),
    (2025, 5, 12),
    (2026, 5, 31),
    (2027, 5, 20),
    (2028, 5, 9),
];

const EID_AL_ADHA: &[Ymd] = &[
    (2022, 7, 10),
    (2023, 6, 29),
    (2024, 6, 17),
    (2025, 6, 6),
    (2026, 5, 27),
    (2027, 5, 17),
    (2028, 5, 5),
];

const ISLAMIC_NEW_YEAR: &[Ymd] = &[
    (2022, 7, 30),
    (2023, 7, 19),
    (2024, 7, 7),
    (2025, 6, 27),
    (2026, 6, 16),
    (2027, 6, 6),
    (2028, 5, 26),
];

const PROPHET_BIRTHDAY: &[Ymd] = &[
    (2022, 10, 8),
    (2023, 9, 28),
    (2024, 9, 16),
    (2025, 9, 5),
    (2026, 8, 25),
    (2027, 8, 15),
    (2028, 8, 3),
];

const VISAK_BOCHEA: &[Ymd] = &[
    (2023, 5, 4),
    (2024, 5, 22),
    (2025, 5, 11),
    (2026, 5, 30),
    (2027, 5, 20),
    (2028, 5, 8),
];

const ROYAL_PLOUGHING: &[Ymd] = &[
    (2023, 5, 8),
    (2024, 5, 26),
    (2025, 5, 15),
    (2026, 6, 3),
    (2027, 5, 24),
    (2028, 5, 12),
];

const PCHUM_BEN: &[Ymd] = &[
    (2023, 10, 13),
    (2023, 10, 14),
    (2023, 10, 15),
    (2024, 10, 1),
    (2024, 10, 2),
    (2024, 10, 3),
    (2025, 9, 21),
    (2025, 9, 22),
    (2025, 9, 23),
    (2026, 10, 10),
    (2026, 10, 11),
    (2026, 10, 12),
    (2027, 9, 29),
    (2027, 9, 30),
    (2027, 10, 1),
    (2028, 9, 17),
    (2028, 9, 18),
    (2028, 9, 19),
];

const WATER_FESTIVAL: &[Ymd] = &[
    (2023, 11, 26),
    (2023, 11, 27),
    (2023, 11, 28),
    (2024, 11, 14),
    (2024, 11, 15),
    (2024, 11, 16),
    (2025, 11, 4),
    (2025, 11, 5),
    (2025, 11, 6),
    (2026, 11, 23),
    (2026, 11, 24),
    (2026, 11, 25),
    (2027, 11, 12),
    (2027, 11, 13),
    (2027, 11, 14),
    (2028, 11, 1),
    (2028, 11, 2),
    (2028, 11, 3),
];

const CHINA: &[HolidayDef] = &[
    def(fixed(1, 1), "New Year's Day", NewYear),
    def(HolidayRule::LunarNewYear(-1), "Spring Festival Eve", LunarNewYear),
    def(HolidayRule::LunarNewYear(0), "Spring Festival", LunarNewYear),
    def(HolidayRule::LunarNewYear(1), "Spring Festival", LunarNewYear),
    def(HolidayRule::LunarNewYear(2), "Spring Festival", LunarNewYear),
    def(Dated(QINGMING), "Tomb-Sweeping Day", Other),
    def(fixed(5, 1), "Labour Day", Other),
    def(Dated(DRAGON_BOAT), "Dragon Boat Festival", Other),
    def(Dated(MID_AUTUMN), "Mid-Autumn Festival", Other),
    def(fixed(10, 1), "National Day", Other),
    def(fixed(10, 2), "National Day", Other),
    def(fixed(10, 3), "National Day", Other),
];

const VIETNAM: &[HolidayDef] = &[
    def(fixed(1, 1), "International New Year's Day", NewYear),
    def(HolidayRule::LunarNewYear(-1), "Lunar New Year's Eve", LunarNewYear),
    def(HolidayRule::LunarNewYear(0), "Tet", LunarNewYear),
    def(HolidayRule::LunarNewYear(1), "Tet Holiday", LunarNewYear),
    def(HolidayRule::LunarNewYear(2), "Tet Holiday", LunarNewYear),
    def(HolidayRule::LunarNewYear(3), "Tet Holiday", LunarNewYear),
    def(Dated(HUNG_KINGS), "Hung Kings' Commemoration Day", Other),
    def(fixed(4, 30), "Reunification Day", Other),
    def(fixed(5, 1), "Labour Day", Other),
    def(fixed(9, 2), "National Day", Other),
];

const CAMBODIA: &[HolidayDef] = &[
    def(fixed(1, 1), "International New Year Day", NewYear),
    def(fixed(1, 7), "Victory over Genocide Day", Other),
    def(fixed(3, 8), "International Women's Day", Other),
    def(fixed(4, 14), "Khmer New Year", KhmerNewYear),
    def(fixed(4, 15), "Khmer New Year", KhmerNewYear),
    def(fixed(4, 16), "Khmer New Year", KhmerNewYear),
    def(fixed(5, 1), "Labour Day", Other),
    def(Dated(VISAK_BOCHEA), "Visak Bochea Day", Other),
    def(fixed(5, 14), "King's Birthday", Other),
    def(Dated(ROYAL_PLOUGHING), "Royal Ploughing Ceremony", Other),
    def(fixed(6, 18), "Queen Mother's Birthday", Other),
    def(fixed(9, 24), "Constitution Day", Other),
    def(Dated(PCHUM_BEN), "Pchum Ben", PchumBen),
    def(fixed(10, 15), "King Father Commemoration Day", Other),
    def(fixed(10, 29), "Coronation Day", Other),
    def(fixed(11, 9), "Independence Day", Other),
    def(Dated(WATER_FESTIVAL), "Water Festival", Other),
];

const INDONESIA: &[HolidayDef] = &[
    def(fixed(1, 1), "New Year's Day", NewYear),
    def(Dated(ISRA_MIRAJ), "Isra and Mi'raj", Other),
    def(HolidayRule::LunarNewYear(0), "Lunar New Year", LunarNewYear),
    def(Dated(NYEPI), "Day of Silence", Other),
    def(Easter(-2), "Good Friday", Other),
    def(Dated(EID_AL_FITR), "Eid al-Fitr", Other),
    def(fixed(5, 1), "Labour Day", Other),
    def(Easter(39), "Ascension Day", Other),
    def(Dated(VESAK), "Vesak Day", Other),
    def(fixed(6, 1), "Pancasila Day", Other),
    def(Dated(EID_AL_ADHA), "Eid al-Adha", Other),
    def(Dated(ISLAMIC_NEW_YEAR), "Islamic New Year", IslamicNewYear),
    def(fixed(8, 17), "Independence Day", Other),
    def(Dated(PROPHET_BIRTHDAY), "Prophet's Birthday", Other),
    def(fixed(12, 25), "Christmas Day", Other),
];

/// Built-in holiday tables for China, Vietnam, Cambodia and Indonesia.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinHolidaySource;

impl BuiltinHolidaySource {
    pub fn new() -> Self {
        Self
    }

    /// Years for which the dated tables are complete.
    pub fn coverage(country: Country) -> RangeInclusive<i32> {
        match country {
            Country::China | Country::Vietnam | Country::Indonesia => 2022..=2028,
            Country::Cambodia => 2023..=2028,
        }
    }

    fn definitions(country: Country) -> &'static [HolidayDef] {
        match country {
            Country::China => CHINA,
            Country::Vietnam => VIETNAM,
            Country::Cambodia => CAMBODIA,
            Country::Indonesia => INDONESIA,
        }
    }

    fn dates_for(rule: &HolidayRule, year: i32) -> Vec<NaiveDate> {
        match rule {
            HolidayRule::Fixed { month, day } => {
                NaiveDate::from_ymd_opt(year, *month, *day).into_iter().collect()
            }
            HolidayRule::Easter(offset) => easter_sunday(year)
                .map(|easter| easter + Duration::days(*offset))
                .into_iter()
                .collect(),
            HolidayRule::LunarNewYear(offset) => dated_in_year(LUNAR_NEW_YEAR, year)
                .into_iter()
                .map(|lny| lny + Duration::days(*offset))
                .collect(),
            HolidayRule::Dated(table) => dated_in_year(table, year),
        }
    }
}

impl HolidaySource for BuiltinHolidaySource {
    fn holidays(
        &self,
        country: Country,
        years: &[i32],
    ) -> Result<Vec<RawHoliday>, HolidaySourceError> {
        let coverage = Self::coverage(country);
        let mut holidays = Vec::new();
        for &year in years {
            let tabled = coverage.contains(&year);
            if !tabled {
                warn!(%country, year, "no lunar/Islamic holiday table for year; fixed-date holidays only");
            }
            for def in Self::definitions(country) {
                if !tabled && def.rule.needs_table() {
                    continue;
                }
                for date in Self::dates_for(&def.rule, year) {
                    holidays.push(RawHoliday::new(date, def.name, def.category));
                }
            }
        }
        holidays.sort_by_key(|h| h.date);
        Ok(holidays)
    }
}

fn dated_in_year(table: &[Ymd], year: i32) -> Vec<NaiveDate> {
    table
        .iter()
        .filter(|(y, _, _)| *y == year)
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

/// Gregorian Easter Sunday (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    let date = NaiveDate::from_ymd_opt(year, month as u32, day as u32)?;
    debug_assert_eq!(date.year(), year);
    Some(date)
}
