use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ShippingError;
use super::rates::{
    RateConfiguration, DEFAULT_DOMESTIC_BASE_RATE, DEFAULT_DOMESTIC_PER_KG_RATE,
    DEFAULT_EXPRESS_BASE_RATE, DEFAULT_EXPRESS_PER_KG_RATE, DEFAULT_INSURANCE_RATE,
    DEFAULT_INSURANCE_THRESHOLD,
};

/// Rate section of the config file.
///
/// Every field is optional; anything left out keeps the built-in default.
/// International rates and discount codes are added on top of the defaults.
///
/// Example YAML:
/// ```yaml
/// rates:
///   domestic: { base: 5.0, per_kg: 1.0 }
///   express: { base: 30.0, per_kg: 5.0 }
///   insurance: { threshold: 20.0, rate: 0.05 }
///   international:
///     International: 12.5
///   discounts:
///     WINTER15: 0.15
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RatesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domestic: Option<ZoneRates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub express: Option<ZoneRates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<InsuranceConfig>,

    /// Per-kilogram rates keyed by zone name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub international: BTreeMap<String, f64>,

    /// Extra discount codes, as fractions in (0, 1)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub discounts: BTreeMap<String, f64>,
}

/// Flat base fee plus a per-kilogram rate.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ZoneRates {
    pub base: f64,
    pub per_kg: f64,
}

/// Surcharge applied to packages heavier than `threshold` kilograms.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InsuranceConfig {
    pub threshold: f64,
    pub rate: f64,
}

impl RatesConfig {
    /// The built-in rates spelled out in full, used when writing a fresh config file.
    pub fn defaults() -> Self {
        Self {
            domestic: Some(ZoneRates {
                base: DEFAULT_DOMESTIC_BASE_RATE,
                per_kg: DEFAULT_DOMESTIC_PER_KG_RATE,
            }),
            express: Some(ZoneRates {
                base: DEFAULT_EXPRESS_BASE_RATE,
                per_kg: DEFAULT_EXPRESS_PER_KG_RATE,
            }),
            insurance: Some(InsuranceConfig {
                threshold: DEFAULT_INSURANCE_THRESHOLD,
                rate: DEFAULT_INSURANCE_RATE,
            }),
            international: BTreeMap::new(),
            discounts: BTreeMap::new(),
        }
    }

    /// Apply this section on top of `RateConfiguration::new()`.
    ///
    /// Goes through the public setters, so the first invalid value aborts the
    /// build. Run [`super::validate_rates`] first to report every problem.
    pub fn build(&self) -> Result<RateConfiguration, ShippingError> {
        let mut rates = RateConfiguration::new();

        if let Some(ref domestic) = self.domestic {
            rates.set_domestic_rates(domestic.base, domestic.per_kg)?;
        }
        if let Some(ref express) = self.express {
            rates.set_express_rates(express.base, express.per_kg)?;
        }
        if let Some(ref insurance) = self.insurance {
            rates.set_insurance(insurance.threshold, insurance.rate)?;
        }
        for (zone, rate) in &self.international {
            rates.register_international_rate(zone.as_str(), *rate);
        }
        for (code, pct) in &self.discounts {
            rates.add_discount_code(code.as_str(), *pct)?;
        }

        Ok(rates)
    }
}
