use super::{
    BufferPolicy, BuiltinHolidaySource, HolidayCache, HolidayKey, HolidaySet, HolidaySource,
    MemoryHolidayCache, RawHoliday,
};
use crate::country::Country;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves `(year, country)` to the set of non-working dates, applying the
/// mega-holiday buffers and caching the result.
///
/// Data problems never fail a lookup: a country without a registered source
/// yields an empty set, and a source error drops only the failing year. Both
/// log a warning and bypass the cache.
#[derive(Clone)]
pub struct HolidayProvider {
    sources: HashMap<Country, Arc<dyn HolidaySource>>,
    buffers: BufferPolicy,
    cache: Arc<dyn HolidayCache>,
}

impl fmt::Debug for HolidayProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut countries: Vec<&Country> = self.sources.keys().collect();
        countries.sort();
        f.debug_struct("HolidayProvider")
            .field("countries", &countries)
            .field("buffers", &self.buffers)
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl Default for HolidayProvider {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HolidayProvider {
    /// Provider with no registered sources.
    pub fn new(buffers: BufferPolicy, cache: Arc<dyn HolidayCache>) -> Self {
        Self {
            sources: HashMap::new(),
            buffers,
            cache,
        }
    }

    /// Built-in tables for every supported country, default buffers, and an
    /// in-memory cache.
    pub fn builtin() -> Self {
        let source: Arc<dyn HolidaySource> = Arc::new(BuiltinHolidaySource::new());
        Self::with_shared_source(source, BufferPolicy::default())
    }

    /// Register `source` for every supported country.
    pub fn with_shared_source(source: Arc<dyn HolidaySource>, buffers: BufferPolicy) -> Self {
        let mut provider = Self::new(buffers, Arc::new(MemoryHolidayCache::new()));
        for country in Country::ALL {
            provider.register_source(country, source.clone());
        }
        provider
    }

    pub fn with_source(mut self, country: Country, source: Arc<dyn HolidaySource>) -> Self {
        self.register_source(country, source);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn HolidayCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn register_source(&mut self, country: Country, source: Arc<dyn HolidaySource>) {
        self.sources.insert(country, source);
        self.cache.clear();
    }

    pub fn buffer_policy(&self) -> &BufferPolicy {
        &self.buffers
    }

    pub fn cache(&self) -> &Arc<dyn HolidayCache> {
        &self.cache
    }

    pub fn supports(&self, country: Country) -> bool {
        self.sources.contains_key(&country)
    }

    /// Holiday set covering `year` and `year - 1` for `country`.
    pub fn get_holidays(&self, year: i32, country: Country) -> Arc<HolidaySet> {
        let key = HolidayKey::new(year, country);
        if let Some(cached) = self.cache.get(&key) {
            debug!(year, %country, "holiday cache hit");
            return cached;
        }

        let fetched = self.fetch_raw(year, country);
        let mut dates = HashSet::with_capacity(fetched.holidays.len() * 3);
        for holiday in &fetched.holidays {
            self.buffers.expand_into(holiday, &mut dates);
        }
        debug!(
            year,
            %country,
            raw = fetched.holidays.len(),
            dates = dates.len(),
            complete = fetched.complete,
            "holiday set built"
        );
        let set = Arc::new(HolidaySet::new(year, country, dates));
        if fetched.complete {
            self.cache.insert(key, set)
        } else {
            // Degraded results stay out of the cache so a later call retries.
            set
        }
    }

    /// Raw, unbuffered holidays for `year` and `year - 1`.
    pub fn raw_holidays(&self, year: i32, country: Country) -> Vec<RawHoliday> {
        self.fetch_raw(year, country).holidays
    }

    /// Each year is fetched on its own so a failure in one keeps the other.
    fn fetch_raw(&self, year: i32, country: Country) -> FetchedHolidays {
        let Some(source) = self.sources.get(&country) else {
            warn!(%country, year, "no holiday source registered; treating as no holidays");
            return FetchedHolidays {
                holidays: Vec::new(),
                complete: false,
            };
        };

        let mut fetched = FetchedHolidays {
            holidays: Vec::new(),
            complete: true,
        };
        for y in [year, year - 1] {
            match source.holidays(country, &[y]) {
                Ok(mut raw) => fetched.holidays.append(&mut raw),
                Err(err) => {
                    warn!(
                        %country,
                        year = y,
                        error = %err,
                        "holiday data unavailable; treating year as holiday-free"
                    );
                    fetched.complete = false;
                }
            }
        }
        fetched.holidays.sort_by_key(|h| h.date);
        fetched
    }
}

struct FetchedHolidays {
    holidays: Vec<RawHoliday>,
    /// False when a year failed or no source is registered.
    complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HolidaySourceError;
    use crate::holidays::{HolidayCategory, NoopHolidayCache, StaticHolidaySource};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn unregistered_country_yields_empty_set() {
        let provider = HolidayProvider::new(BufferPolicy::default(), Arc::new(NoopHolidayCache));
        let set = provider.get_holidays(2026, Country::China);
        assert!(set.is_empty());
        assert!(!provider.supports(Country::China));
    }

    #[test]
    fn fetch_covers_previous_year() {
        let source = StaticHolidaySource::new()
            .with_holiday(
                Country::Vietnam,
                RawHoliday::new(d(2025, 9, 2), "National Day", HolidayCategory::Other),
            )
            .with_holiday(
                Country::Vietnam,
                RawHoliday::new(d(2023, 9, 2), "National Day", HolidayCategory::Other),
            );
        let provider = HolidayProvider::new(BufferPolicy::default(), Arc::new(MemoryHolidayCache::new()))
            .with_source(Country::Vietnam, Arc::new(source));
        let set = provider.get_holidays(2026, Country::Vietnam);
        assert!(set.contains(d(2025, 9, 2)));
        assert!(!set.contains(d(2023, 9, 2)));
    }

    struct FailsFor(i32);

    impl HolidaySource for FailsFor {
        fn holidays(
            &self,
            _country: Country,
            years: &[i32],
        ) -> Result<Vec<RawHoliday>, HolidaySourceError> {
            if years.contains(&self.0) {
                return Err(HolidaySourceError::InvalidRecord("broken feed".into()));
            }
            Ok(years
                .iter()
                .map(|&y| RawHoliday::new(d(y, 9, 2), "National Day", HolidayCategory::Other))
                .collect())
        }
    }

    #[test]
    fn failed_year_keeps_the_other_and_is_not_cached() {
        let provider = HolidayProvider::new(BufferPolicy::default(), Arc::new(MemoryHolidayCache::new()))
            .with_source(Country::Vietnam, Arc::new(FailsFor(2025)));
        let set = provider.get_holidays(2026, Country::Vietnam);
        assert!(set.contains(d(2026, 9, 2)));
        assert!(!set.contains(d(2025, 9, 2)));
        assert!(provider.cache().is_empty());
    }
}
