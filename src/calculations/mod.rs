pub mod backward_pass;
pub mod sourcing_matrix;

pub use backward_pass::{BackwardPass, BusinessDayShift};
pub use sourcing_matrix::SourcingMatrix;

use crate::country::Country;
use crate::holidays::HolidayProvider;
use chrono::NaiveDate;

/// Shorthand for [`BackwardPass::subtract_business_days`].
pub fn subtract_business_days(
    provider: &HolidayProvider,
    start: NaiveDate,
    working_days: u32,
    country: Country,
) -> BusinessDayShift {
    BackwardPass::new(provider).subtract_business_days(start, working_days, country)
}
