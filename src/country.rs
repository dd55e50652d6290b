use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Production countries the planner knows how to schedule against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
    China,
    Vietnam,
    Cambodia,
    Indonesia,
}

impl Country {
    pub const ALL: [Country; 4] = [
        Country::China,
        Country::Vietnam,
        Country::Cambodia,
        Country::Indonesia,
    ];

    /// Countries offered as fabric mills.
    pub const FABRIC_ORIGINS: [Country; 3] = [Country::China, Country::Vietnam, Country::Indonesia];

    /// Countries offered as sewing factories.
    pub const SEWING_ORIGINS: [Country; 3] =
        [Country::Vietnam, Country::Cambodia, Country::Indonesia];

    pub fn code(&self) -> &'static str {
        match self {
            Country::China => "CHINA",
            Country::Vietnam => "VIETNAM",
            Country::Cambodia => "CAMBODIA",
            Country::Indonesia => "INDONESIA",
        }
    }

    /// ISO 3166-1 alpha-2 code, used by holiday files.
    pub fn iso_code(&self) -> &'static str {
        match self {
            Country::China => "CN",
            Country::Vietnam => "VN",
            Country::Cambodia => "KH",
            Country::Indonesia => "ID",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Country::ALL
            .into_iter()
            .find(|c| c.code() == normalized || c.iso_code() == normalized)
            .ok_or_else(|| PlannerError::InvalidCountry(s.trim().to_string()))
    }
}
