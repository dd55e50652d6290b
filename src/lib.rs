pub mod calculations;
pub mod calendar;
pub mod config;
pub mod country;
pub mod error;
pub mod export;
pub mod holidays;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod lead_time;
pub mod logging;
pub mod planner;
pub mod schedule;

pub use calculations::{BackwardPass, BusinessDayShift, SourcingMatrix, subtract_business_days};
pub use calendar::{DayKind, WorkCalendar};
pub use config::PlannerConfig;
pub use country::Country;
pub use error::{HolidaySourceError, PlannerError, PlannerResult};
pub use export::{
    export_file_name, save_schedule_to_csv, save_schedule_to_dir, schedule_to_csv_bytes,
    write_schedule_csv,
};
pub use holidays::{
    BufferPolicy, BufferRule, BuiltinHolidaySource, HolidayCache, HolidayCategory, HolidayKey,
    HolidayProvider, HolidaySet, HolidaySource, LayeredHolidaySource, MemoryHolidayCache,
    NoopHolidayCache, RawHoliday, StaticHolidaySource,
};
pub use lead_time::LeadTimes;
pub use planner::TaPlanner;
pub use schedule::{LeadTimeStage, ScheduleChain, ScheduleResult, StageKind};
