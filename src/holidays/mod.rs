//! Country holiday data: raw public holidays from pluggable sources, the
//! mega-holiday buffer policy, and the cached `HolidaySet` the scheduler reads.

pub mod buffer;
pub mod builtin;
pub mod cache;
pub mod file;
pub mod provider;

use crate::country::Country;
use crate::error::HolidaySourceError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub use buffer::{BufferPolicy, BufferRule};
pub use builtin::BuiltinHolidaySource;
pub use cache::{HolidayCache, HolidayKey, MemoryHolidayCache, NoopHolidayCache};
pub use file::{LayeredHolidaySource, StaticHolidaySource};
pub use provider::HolidayProvider;

/// Classification of a holiday used to decide whether factories close for
/// longer than the official listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayCategory {
    /// Gregorian new year (January 1st).
    NewYear,
    /// Spring Festival, Tet, Imlek.
    LunarNewYear,
    KhmerNewYear,
    IslamicNewYear,
    PchumBen,
    Other,
}

impl HolidayCategory {
    pub const ALL: [HolidayCategory; 6] = [
        HolidayCategory::NewYear,
        HolidayCategory::LunarNewYear,
        HolidayCategory::KhmerNewYear,
        HolidayCategory::IslamicNewYear,
        HolidayCategory::PchumBen,
        HolidayCategory::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            HolidayCategory::NewYear => "new_year",
            HolidayCategory::LunarNewYear => "lunar_new_year",
            HolidayCategory::KhmerNewYear => "khmer_new_year",
            HolidayCategory::IslamicNewYear => "islamic_new_year",
            HolidayCategory::PchumBen => "pchum_ben",
            HolidayCategory::Other => "other",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        HolidayCategory::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Best-effort classification from an English display name. Only used for
    /// holiday files that do not carry a category column.
    pub fn classify(name: &str) -> Self {
        if name.contains("Pchum Ben") {
            HolidayCategory::PchumBen
        } else if name.contains("Spring Festival")
            || name.contains("Tet")
            || name.contains("Lunar New Year")
            || name.contains("Chinese New Year")
        {
            HolidayCategory::LunarNewYear
        } else if name.contains("Khmer New Year") {
            HolidayCategory::KhmerNewYear
        } else if name.contains("Islamic New Year") {
            HolidayCategory::IslamicNewYear
        } else if name.contains("New Year") {
            HolidayCategory::NewYear
        } else {
            HolidayCategory::Other
        }
    }
}

/// A single public holiday as reported by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHoliday {
    pub date: NaiveDate,
    pub name: String,
    pub category: HolidayCategory,
}

impl RawHoliday {
    pub fn new(date: NaiveDate, name: impl Into<String>, category: HolidayCategory) -> Self {
        Self {
            date,
            name: name.into(),
            category,
        }
    }
}

/// External holiday-calendar capability, queried per country for a set of years.
pub trait HolidaySource: Send + Sync {
    fn holidays(
        &self,
        country: Country,
        years: &[i32],
    ) -> Result<Vec<RawHoliday>, HolidaySourceError>;
}

impl<T: HolidaySource + ?Sized> HolidaySource for Arc<T> {
    fn holidays(
        &self,
        country: Country,
        years: &[i32],
    ) -> Result<Vec<RawHoliday>, HolidaySourceError> {
        (**self).holidays(country, years)
    }
}

/// Non-working dates for one `(year, country)` key. Covers `year` and
/// `year - 1`, buffers included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    year: i32,
    country: Country,
    dates: HashSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new(year: i32, country: Country, dates: HashSet<NaiveDate>) -> Self {
        Self {
            year,
            country,
            dates,
        }
    }

    pub fn empty(year: i32, country: Country) -> Self {
        Self::new(year, country, HashSet::new())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Dates falling in `year`, ascending.
    pub fn dates_in_year(&self, year: i32) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .dates
            .iter()
            .copied()
            .filter(|d| d.year() == year)
            .collect();
        dates.sort();
        dates
    }
}
