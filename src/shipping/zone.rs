use serde::Serialize;
use std::fmt;

use super::error::ShippingError;

/// Destination zones understood by the calculators.
///
/// Zone names are matched exactly and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Zone {
    Domestic,
    Express,
    International,
}

impl Zone {
    pub fn parse(s: &str) -> Result<Self, ShippingError> {
        match s {
            "Domestic" => Ok(Zone::Domestic),
            "Express" => Ok(Zone::Express),
            "International" => Ok(Zone::International),
            other => Err(ShippingError::UnknownZone {
                zone: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Domestic => "Domestic",
            Zone::Express => "Express",
            Zone::International => "International",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
