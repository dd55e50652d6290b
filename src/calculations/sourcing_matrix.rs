use crate::country::Country;
use crate::holidays::HolidayProvider;
use crate::lead_time::LeadTimes;
use crate::schedule::{ScheduleChain, ScheduleResult};
use chrono::NaiveDate;
use rayon::prelude::*;

/// Every fabric × sewing country pair evaluated against one in-store date.
pub struct SourcingMatrix<'a> {
    provider: &'a HolidayProvider,
    lead_times: &'a LeadTimes,
}

impl<'a> SourcingMatrix<'a> {
    pub fn new(provider: &'a HolidayProvider, lead_times: &'a LeadTimes) -> Self {
        Self {
            provider,
            lead_times,
        }
    }

    /// Schedules for all pairs, latest booking deadline first (most slack),
    /// ties broken by country order.
    pub fn execute(
        &self,
        in_store_date: NaiveDate,
        fabric_origins: &[Country],
        sewing_origins: &[Country],
    ) -> Vec<ScheduleResult> {
        let pairs: Vec<(Country, Country)> = fabric_origins
            .iter()
            .flat_map(|&f| sewing_origins.iter().map(move |&s| (f, s)))
            .collect();

        let mut results: Vec<ScheduleResult> = pairs
            .par_iter()
            .map(|&(fabric, sewing)| {
                ScheduleChain::new(self.provider, self.lead_times)
                    .build_schedule(in_store_date, fabric, sewing)
            })
            .collect();

        results.sort_by(|a, b| {
            b.booking_date()
                .cmp(&a.booking_date())
                .then_with(|| a.fabric_country.cmp(&b.fabric_country))
                .then_with(|| a.sewing_country.cmp(&b.sewing_country))
        });
        results
    }
}
