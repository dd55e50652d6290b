//! In-memory and file-backed holiday sources.

use super::{HolidayCategory, HolidaySource, RawHoliday};
use crate::country::Country;
use crate::error::HolidaySourceError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Holidays held in memory, keyed by country. Countries without entries
/// return an empty list for any year.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidaySource {
    holidays: HashMap<Country, Vec<RawHoliday>>,
}

impl StaticHolidaySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holiday(mut self, country: Country, holiday: RawHoliday) -> Self {
        self.add(country, holiday);
        self
    }

    pub fn add(&mut self, country: Country, holiday: RawHoliday) {
        self.holidays.entry(country).or_default().push(holiday);
    }

    pub fn len(&self) -> usize {
        self.holidays.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load `country,date,name[,category]` rows. When `category` is blank the
    /// name is classified with [`HolidayCategory::classify`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, HolidaySourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut source = Self::new();
        for record in csv_reader.deserialize::<HolidayCsvRecord>() {
            let (country, holiday) = record?.into_holiday()?;
            source.add(country, holiday);
        }
        debug!(count = source.len(), "loaded holidays from csv");
        Ok(source)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, HolidaySourceError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }
}

impl HolidaySource for StaticHolidaySource {
    fn holidays(
        &self,
        country: Country,
        years: &[i32],
    ) -> Result<Vec<RawHoliday>, HolidaySourceError> {
        Ok(self
            .holidays
            .get(&country)
            .map(|list| {
                list.iter()
                    .filter(|h| years.contains(&h.date.year()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HolidayCsvRecord {
    country: String,
    date: String,
    name: String,
    #[serde(default)]
    category: String,
}

impl HolidayCsvRecord {
    fn into_holiday(self) -> Result<(Country, RawHoliday), HolidaySourceError> {
        let country = self
            .country
            .parse::<Country>()
            .map_err(|err| HolidaySourceError::InvalidRecord(err.to_string()))?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            HolidaySourceError::InvalidRecord(format!("invalid date '{}': {e}", self.date))
        })?;
        let category = if self.category.trim().is_empty() {
            HolidayCategory::classify(&self.name)
        } else {
            HolidayCategory::from_key(&self.category).ok_or_else(|| {
                HolidaySourceError::InvalidRecord(format!(
                    "unknown holiday category '{}'",
                    self.category
                ))
            })?
        };
        Ok((country, RawHoliday::new(date, self.name, category)))
    }
}

/// Union of several sources. A failing layer is skipped; the call fails only
/// when every layer fails.
#[derive(Clone, Default)]
pub struct LayeredHolidaySource {
    layers: Vec<Arc<dyn HolidaySource>>,
}

impl LayeredHolidaySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: Arc<dyn HolidaySource>) -> Self {
        self.layers.push(layer);
        self
    }
}

impl HolidaySource for LayeredHolidaySource {
    fn holidays(
        &self,
        country: Country,
        years: &[i32],
    ) -> Result<Vec<RawHoliday>, HolidaySourceError> {
        let mut merged = Vec::new();
        let mut last_error = None;
        let mut any_ok = self.layers.is_empty();
        for layer in &self.layers {
            match layer.holidays(country, years) {
                Ok(holidays) => {
                    any_ok = true;
                    merged.extend(holidays);
                }
                Err(err) => {
                    warn!(%country, ?years, error = %err, "holiday layer failed");
                    last_error = Some(err);
                }
            }
        }
        match (any_ok, last_error) {
            (false, Some(err)) => Err(err),
            _ => {
                merged.sort_by_key(|h| h.date);
                Ok(merged)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_parse_with_and_without_category() {
        let data = "country,date,name,category\n\
                    KH,2027-10-29,Pchum Ben,\n\
                    VIETNAM,2027-02-06,Factory shutdown,lunar_new_year\n\
                    VN,2027-05-19,Company outing,\n";
        let source = StaticHolidaySource::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(source.len(), 3);

        let kh = source.holidays(Country::Cambodia, &[2027]).unwrap();
        assert_eq!(kh[0].category, HolidayCategory::PchumBen);

        let vn = source.holidays(Country::Vietnam, &[2027]).unwrap();
        assert_eq!(vn.len(), 2);
        assert!(vn.iter().any(|h| h.category == HolidayCategory::LunarNewYear));
        assert!(vn.iter().any(|h| h.category == HolidayCategory::Other));
    }

    #[test]
    fn csv_rejects_unknown_category() {
        let data = "country,date,name,category\nCN,2026-01-01,New Year,mystery\n";
        let err = StaticHolidaySource::from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("mystery"));
    }

    struct BrokenFeed;

    impl HolidaySource for BrokenFeed {
        fn holidays(
            &self,
            _country: Country,
            _years: &[i32],
        ) -> Result<Vec<RawHoliday>, HolidaySourceError> {
            Err(HolidaySourceError::InvalidRecord("broken feed".into()))
        }
    }

    #[test]
    fn layered_source_survives_failing_layer() {
        let extra = StaticHolidaySource::new().with_holiday(
            Country::Cambodia,
            RawHoliday::new(
                NaiveDate::from_ymd_opt(2027, 4, 14).unwrap(),
                "Khmer New Year",
                HolidayCategory::KhmerNewYear,
            ),
        );
        let layered = LayeredHolidaySource::new()
            .with_layer(Arc::new(BrokenFeed))
            .with_layer(Arc::new(extra));
        let holidays = layered.holidays(Country::Cambodia, &[2027]).unwrap();
        assert_eq!(holidays.len(), 1);
    }

    #[test]
    fn layered_source_fails_when_all_layers_fail() {
        let layered = LayeredHolidaySource::new().with_layer(Arc::new(BrokenFeed));
        assert!(layered.holidays(Country::Cambodia, &[2027]).is_err());
    }
}
