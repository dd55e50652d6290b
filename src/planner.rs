use crate::calculations::SourcingMatrix;
use crate::config::PlannerConfig;
use crate::country::Country;
use crate::error::{PlannerError, PlannerResult};
use crate::holidays::{
    BuiltinHolidaySource, HolidayProvider, HolidaySet, HolidaySource, LayeredHolidaySource,
    StaticHolidaySource,
};
use crate::schedule::{ScheduleChain, ScheduleResult};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point used by the shells: validates input at the boundary and runs
/// the schedule chain against a shared holiday provider.
#[derive(Debug, Clone)]
pub struct TaPlanner {
    config: PlannerConfig,
    provider: HolidayProvider,
}

impl Default for TaPlanner {
    fn default() -> Self {
        Self::new(PlannerConfig::default(), HolidayProvider::builtin())
    }
}

impl TaPlanner {
    pub fn new(config: PlannerConfig, provider: HolidayProvider) -> Self {
        Self { config, provider }
    }

    /// Built-in holiday tables, overlaid with `holiday_file` when configured,
    /// and the configured buffer rules.
    pub fn from_config(config: PlannerConfig) -> PlannerResult<Self> {
        let builtin: Arc<dyn HolidaySource> = Arc::new(BuiltinHolidaySource::new());
        let source: Arc<dyn HolidaySource> = match &config.holiday_file {
            Some(path) => {
                let extra = StaticHolidaySource::from_csv_path(path)?;
                info!(path = %path.display(), holidays = extra.len(), "holiday file loaded");
                Arc::new(
                    LayeredHolidaySource::new()
                        .with_layer(builtin)
                        .with_layer(Arc::new(extra)),
                )
            }
            None => builtin,
        };
        let provider = HolidayProvider::with_shared_source(source, config.buffer_policy());
        Ok(Self::new(config, provider))
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn provider(&self) -> &HolidayProvider {
        &self.provider
    }

    pub fn default_in_store_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 14).unwrap_or(NaiveDate::MIN)
    }

    pub fn parse_date(input: &str) -> PlannerResult<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| PlannerError::InvalidDate {
            input: input.trim().to_string(),
        })
    }

    pub fn validate_in_store_date(&self, in_store_date: NaiveDate) -> PlannerResult<()> {
        let earliest = self.config.earliest_in_store_date;
        if in_store_date < earliest {
            return Err(PlannerError::InStoreDateTooEarly {
                date: in_store_date,
                earliest,
            });
        }
        Ok(())
    }

    pub fn plan(
        &self,
        in_store_date: NaiveDate,
        fabric_country: Country,
        sewing_country: Country,
    ) -> PlannerResult<ScheduleResult> {
        self.validate_in_store_date(in_store_date)?;
        let schedule = ScheduleChain::new(&self.provider, &self.config.lead_times).build_schedule(
            in_store_date,
            fabric_country,
            sewing_country,
        );
        info!(
            %in_store_date,
            fabric = %fabric_country,
            sewing = %sewing_country,
            booking = %schedule.booking_date(),
            delay = schedule.total_delay_days,
            "schedule computed"
        );
        if let Some(message) = schedule.holiday_warning(self.config.delay_warning_threshold) {
            warn!(delay = schedule.total_delay_days, "{message}");
        }
        Ok(schedule)
    }

    /// Parse raw shell input (`YYYY-MM-DD`, country names or ISO codes) and plan.
    pub fn plan_from_strs(
        &self,
        in_store_date: &str,
        fabric_country: &str,
        sewing_country: &str,
    ) -> PlannerResult<ScheduleResult> {
        let date = Self::parse_date(in_store_date)?;
        let fabric = fabric_country.parse::<Country>()?;
        let sewing = sewing_country.parse::<Country>()?;
        self.plan(date, fabric, sewing)
    }

    /// Schedules for every offered fabric × sewing pair, latest booking first.
    pub fn compare(&self, in_store_date: NaiveDate) -> PlannerResult<Vec<ScheduleResult>> {
        self.validate_in_store_date(in_store_date)?;
        Ok(
            SourcingMatrix::new(&self.provider, &self.config.lead_times).execute(
                in_store_date,
                &Country::FABRIC_ORIGINS,
                &Country::SEWING_ORIGINS,
            ),
        )
    }

    pub fn holidays(&self, year: i32, country: Country) -> Arc<HolidaySet> {
        self.provider.get_holidays(year, country)
    }

    pub fn holiday_warning(&self, schedule: &ScheduleResult) -> Option<String> {
        schedule.holiday_warning(self.config.delay_warning_threshold)
    }
}
