use crate::calculations::BackwardPass;
use crate::country::Country;
use crate::error::PlannerResult;
use crate::holidays::HolidayProvider;
use crate::lead_time::LeadTimes;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows of the Time & Action plan, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Booking,
    InHouse,
    Cut,
    ExFactory,
    InStore,
}

impl StageKind {
    pub fn label(&self) -> &'static str {
        match self {
            StageKind::Booking => "Fabric Booking",
            StageKind::InHouse => "Fabric In-House",
            StageKind::Cut => "Cut Date",
            StageKind::ExFactory => "Ex-Factory",
            StageKind::InStore => "In-Store",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTimeStage {
    pub stage: StageKind,
    pub date: NaiveDate,
    pub description: String,
    /// Days lost to holidays while computing this stage.
    pub delay_days: u32,
}

impl LeadTimeStage {
    fn new(stage: StageKind, date: NaiveDate, description: String, delay_days: u32) -> Self {
        Self {
            stage,
            date,
            description,
            delay_days,
        }
    }
}

/// A computed T&A plan. `stages` runs from Booking to In-Store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub in_store_date: NaiveDate,
    pub fabric_country: Country,
    pub sewing_country: Country,
    /// Arrival at the distribution centre.
    pub dc_date: NaiveDate,
    /// Handover date; its holiday delay is folded into the Cut row.
    pub handover_date: NaiveDate,
    pub stages: Vec<LeadTimeStage>,
    /// `in_store_date - booking_date` in calendar days.
    pub total_lead_time_days: i64,
    pub total_delay_days: u32,
}

impl ScheduleResult {
    pub fn stage(&self, kind: StageKind) -> Option<&LeadTimeStage> {
        self.stages.iter().find(|s| s.stage == kind)
    }

    fn stage_date(&self, kind: StageKind) -> NaiveDate {
        self.stage(kind)
            .map(|s| s.date)
            .unwrap_or(self.in_store_date)
    }

    /// The fabric order deadline.
    pub fn booking_date(&self) -> NaiveDate {
        self.stage_date(StageKind::Booking)
    }

    pub fn in_house_date(&self) -> NaiveDate {
        self.stage_date(StageKind::InHouse)
    }

    pub fn cut_date(&self) -> NaiveDate {
        self.stage_date(StageKind::Cut)
    }

    pub fn ex_factory_date(&self) -> NaiveDate {
        self.stage_date(StageKind::ExFactory)
    }

    /// Warning text when holidays pushed the plan back by more than
    /// `threshold` days.
    pub fn holiday_warning(&self, threshold: u32) -> Option<String> {
        (self.total_delay_days > threshold).then(|| {
            format!(
                "Holidays pushed the schedule back by {} days. Check whether the Lunar New Year / Tet period falls inside the plan.",
                self.total_delay_days
            )
        })
    }

    /// Tabular view: stage, date, description, delay_days and a `deadline`
    /// flag on the Booking row.
    pub fn to_dataframe(&self) -> PlannerResult<DataFrame> {
        let stages: Vec<&str> = self.stages.iter().map(|s| s.stage.label()).collect();
        let dates: Vec<i32> = self.stages.iter().map(|s| date_to_i32(s.date)).collect();
        let descriptions: Vec<&str> = self.stages.iter().map(|s| s.description.as_str()).collect();
        let delays: Vec<u32> = self.stages.iter().map(|s| s.delay_days).collect();
        let deadline: Vec<bool> = self
            .stages
            .iter()
            .map(|s| s.stage == StageKind::Booking)
            .collect();

        let date_series =
            Series::new(PlSmallStr::from_static("date"), dates).cast(&DataType::Date)?;
        let df = DataFrame::new(vec![
            Series::new(PlSmallStr::from_static("stage"), stages).into(),
            date_series.into(),
            Series::new(PlSmallStr::from_static("description"), descriptions).into(),
            Series::new(PlSmallStr::from_static("delay_days"), delays).into(),
            Series::new(PlSmallStr::from_static("deadline"), deadline).into(),
        ])?;
        Ok(df)
    }
}

/// Convert NaiveDate to Polars i32 date
pub fn date_to_i32(date: NaiveDate) -> i32 {
    (date - NaiveDateTime::UNIX_EPOCH.date()).num_days() as i32
}

pub fn i32_to_date(days: i32) -> NaiveDate {
    NaiveDateTime::UNIX_EPOCH.date() + Duration::days(days as i64)
}

/// Back-calculates a T&A plan from the in-store date.
pub struct ScheduleChain<'a> {
    provider: &'a HolidayProvider,
    lead_times: &'a LeadTimes,
}

impl<'a> ScheduleChain<'a> {
    pub fn new(provider: &'a HolidayProvider, lead_times: &'a LeadTimes) -> Self {
        Self {
            provider,
            lead_times,
        }
    }

    pub fn build_schedule(
        &self,
        in_store_date: NaiveDate,
        fabric_country: Country,
        sewing_country: Country,
    ) -> ScheduleResult {
        let lt = self.lead_times;
        let pass = BackwardPass::new(self.provider);
        let transit_days = lt.transit_days(fabric_country, sewing_country);

        let dc_date = in_store_date - Duration::days(lt.dc_to_store_days.into());
        let ship_date = dc_date - Duration::days(lt.shipping_days.into());
        let handover = pass.subtract_business_days(ship_date, lt.handover_working_days, sewing_country);
        let cut = pass.subtract_business_days(handover.date, lt.sewing_working_days, sewing_country);
        let in_house_date = cut.date - Duration::days(transit_days.into());
        let booking = pass.subtract_business_days(in_house_date, lt.fabric_working_days, fabric_country);

        let stages = vec![
            LeadTimeStage::new(
                StageKind::Booking,
                booking.date,
                format!("Fabric production {} days", lt.fabric_working_days),
                booking.impact_days,
            ),
            LeadTimeStage::new(
                StageKind::InHouse,
                in_house_date,
                format!("Transit {} days", transit_days),
                0,
            ),
            LeadTimeStage::new(
                StageKind::Cut,
                cut.date,
                format!(
                    "Sewing {} days + handover {} days",
                    lt.sewing_working_days, lt.handover_working_days
                ),
                handover.impact_days + cut.impact_days,
            ),
            LeadTimeStage::new(
                StageKind::ExFactory,
                ship_date,
                format!("Logistics/shipping {} days", lt.logistics_days()),
                0,
            ),
            LeadTimeStage::new(StageKind::InStore, in_store_date, "Target date".to_string(), 0),
        ];

        ScheduleResult {
            in_store_date,
            fabric_country,
            sewing_country,
            dc_date,
            handover_date: handover.date,
            stages,
            total_lead_time_days: (in_store_date - booking.date).num_days(),
            total_delay_days: handover.impact_days + cut.impact_days + booking.impact_days,
        }
    }
}
