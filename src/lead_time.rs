use crate::country::Country;
use serde::{Deserialize, Serialize};

/// Fixed lead times of the sourcing chain. Calendar-day offsets are plain date
/// arithmetic; working-day offsets go through the holiday-aware walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadTimes {
    /// Distribution centre to store, calendar days.
    pub dc_to_store_days: u32,
    /// Ocean/air freight from ex-factory to DC, calendar days.
    pub shipping_days: u32,
    /// Finishing, packing and handover, working days in the sewing country.
    pub handover_working_days: u32,
    /// Cut-to-pack sewing, working days in the sewing country.
    pub sewing_working_days: u32,
    /// Fabric transit when mill and factory are in different countries.
    pub cross_border_transit_days: u32,
    /// Fabric transit when mill and factory share a country.
    pub domestic_transit_days: u32,
    /// Fabric production, working days in the fabric country.
    pub fabric_working_days: u32,
}

impl Default for LeadTimes {
    fn default() -> Self {
        Self {
            dc_to_store_days: 10,
            shipping_days: 53,
            handover_working_days: 7,
            sewing_working_days: 35,
            cross_border_transit_days: 14,
            domestic_transit_days: 5,
            fabric_working_days: 50,
        }
    }
}

impl LeadTimes {
    pub fn transit_days(&self, fabric: Country, sewing: Country) -> u32 {
        if fabric != sewing {
            self.cross_border_transit_days
        } else {
            self.domestic_transit_days
        }
    }

    /// DC and freight legs combined, in calendar days.
    pub fn logistics_days(&self) -> u32 {
        self.dc_to_store_days + self.shipping_days
    }
}
