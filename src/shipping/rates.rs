use serde::Serialize;
use std::collections::BTreeMap;

use super::error::ShippingError;

pub const DEFAULT_DOMESTIC_BASE_RATE: f64 = 5.0;
pub const DEFAULT_DOMESTIC_PER_KG_RATE: f64 = 1.0;
pub const DEFAULT_EXPRESS_BASE_RATE: f64 = 30.0;
pub const DEFAULT_EXPRESS_PER_KG_RATE: f64 = 5.0;
pub const DEFAULT_INSURANCE_THRESHOLD: f64 = 20.0;
pub const DEFAULT_INSURANCE_RATE: f64 = 0.05;

/// Discount codes every new configuration starts with.
pub const DEFAULT_DISCOUNTS: [(&str, f64); 2] = [("SUMMER10", 0.10), ("BULK20", 0.20)];

/// Tunable parameters for the configurable fee calculator.
///
/// Constructed with defaults and changed only through the setters below,
/// which enforce the invariants at insertion time:
/// - base, per-kg and insurance values are finite and non-negative
/// - every discount fraction lies strictly between 0 and 1
///
/// There is no internal synchronization. Share it read-only once
/// configured, or guard it externally while mutating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateConfiguration {
    domestic_base_rate: f64,
    domestic_per_kg_rate: f64,
    express_base_rate: f64,
    express_per_kg_rate: f64,
    international_rates: BTreeMap<String, f64>,
    volume_discounts: BTreeMap<String, f64>,
    insurance_threshold: f64,
    insurance_rate: f64,
}

impl Default for RateConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

impl RateConfiguration {
    pub fn new() -> Self {
        Self {
            domestic_base_rate: DEFAULT_DOMESTIC_BASE_RATE,
            domestic_per_kg_rate: DEFAULT_DOMESTIC_PER_KG_RATE,
            express_base_rate: DEFAULT_EXPRESS_BASE_RATE,
            express_per_kg_rate: DEFAULT_EXPRESS_PER_KG_RATE,
            international_rates: BTreeMap::new(),
            volume_discounts: DEFAULT_DISCOUNTS
                .iter()
                .map(|(code, pct)| (code.to_string(), *pct))
                .collect(),
            insurance_threshold: DEFAULT_INSURANCE_THRESHOLD,
            insurance_rate: DEFAULT_INSURANCE_RATE,
        }
    }

    /// Insert or overwrite the per-kilogram rate for `zone`. Last write wins.
    ///
    /// The fee calculator only ever looks up the key `"International"`, so
    /// rates registered under any other name are stored but unreachable.
    pub fn register_international_rate(&mut self, zone: impl Into<String>, rate_per_kg: f64) {
        self.international_rates.insert(zone.into(), rate_per_kg);
    }

    /// Insert or overwrite a discount code.
    ///
    /// `percentage` is a fraction and must satisfy `0 < percentage < 1`.
    pub fn add_discount_code(
        &mut self,
        code: impl Into<String>,
        percentage: f64,
    ) -> Result<(), ShippingError> {
        if !(percentage > 0.0 && percentage < 1.0) {
            return Err(ShippingError::InvalidDiscountPercentage { percentage });
        }
        self.volume_discounts.insert(code.into(), percentage);
        Ok(())
    }

    pub fn set_domestic_rates(&mut self, base: f64, per_kg: f64) -> Result<(), ShippingError> {
        check_rate("domestic.base", base)?;
        check_rate("domestic.per_kg", per_kg)?;
        self.domestic_base_rate = base;
        self.domestic_per_kg_rate = per_kg;
        Ok(())
    }

    pub fn set_express_rates(&mut self, base: f64, per_kg: f64) -> Result<(), ShippingError> {
        check_rate("express.base", base)?;
        check_rate("express.per_kg", per_kg)?;
        self.express_base_rate = base;
        self.express_per_kg_rate = per_kg;
        Ok(())
    }

    pub fn set_insurance(&mut self, threshold: f64, rate: f64) -> Result<(), ShippingError> {
        check_rate("insurance.threshold", threshold)?;
        check_rate("insurance.rate", rate)?;
        self.insurance_threshold = threshold;
        self.insurance_rate = rate;
        Ok(())
    }

    pub fn domestic_base_rate(&self) -> f64 {
        self.domestic_base_rate
    }

    pub fn domestic_per_kg_rate(&self) -> f64 {
        self.domestic_per_kg_rate
    }

    pub fn express_base_rate(&self) -> f64 {
        self.express_base_rate
    }

    pub fn express_per_kg_rate(&self) -> f64 {
        self.express_per_kg_rate
    }

    pub fn insurance_threshold(&self) -> f64 {
        self.insurance_threshold
    }

    pub fn insurance_rate(&self) -> f64 {
        self.insurance_rate
    }

    pub fn international_rate(&self, zone: &str) -> Option<f64> {
        self.international_rates.get(zone).copied()
    }

    pub fn discount(&self, code: &str) -> Option<f64> {
        self.volume_discounts.get(code).copied()
    }

    /// International rates ordered by zone name
    pub fn international_rates(&self) -> &BTreeMap<String, f64> {
        &self.international_rates
    }

    /// Discount codes ordered by code
    pub fn volume_discounts(&self) -> &BTreeMap<String, f64> {
        &self.volume_discounts
    }
}

fn check_rate(field: &'static str, value: f64) -> Result<(), ShippingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ShippingError::InvalidRate { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RateConfiguration::new();
        assert_eq!(config.domestic_base_rate(), 5.0);
        assert_eq!(config.domestic_per_kg_rate(), 1.0);
        assert_eq!(config.express_base_rate(), 30.0);
        assert_eq!(config.express_per_kg_rate(), 5.0);
        assert_eq!(config.insurance_threshold(), 20.0);
        assert_eq!(config.insurance_rate(), 0.05);
        assert_eq!(config.discount("SUMMER10"), Some(0.10));
        assert_eq!(config.discount("BULK20"), Some(0.20));
        assert_eq!(config.volume_discounts().len(), 2);
        assert!(config.international_rates().is_empty());
    }

    #[test]
    fn test_register_international_rate_last_write_wins() {
        let mut config = RateConfiguration::new();
        config.register_international_rate("Canada", 8.0);
        config.register_international_rate("Canada", 8.0);
        assert_eq!(config.international_rate("Canada"), Some(8.0));
        assert_eq!(config.international_rates().len(), 1);

        config.register_international_rate("Canada", 9.5);
        assert_eq!(config.international_rate("Canada"), Some(9.5));
    }

    #[test]
    fn test_register_international_rate_accepts_any_value() {
        let mut config = RateConfiguration::new();
        config.register_international_rate("Nowhere", -3.0);
        assert_eq!(config.international_rate("Nowhere"), Some(-3.0));
    }

    #[test]
    fn test_add_discount_code_rejects_out_of_range() {
        let mut config = RateConfiguration::new();
        for pct in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let err = config.add_discount_code("BAD", pct).unwrap_err();
            assert!(matches!(err, ShippingError::InvalidDiscountPercentage { .. }));
        }
        assert_eq!(config.discount("BAD"), None);
    }

    #[test]
    fn test_add_discount_code_overwrites_silently() {
        let mut config = RateConfiguration::new();
        config.add_discount_code("SUMMER10", 0.15).unwrap();
        assert_eq!(config.discount("SUMMER10"), Some(0.15));
        config.add_discount_code("WINTER5", 0.05).unwrap();
        assert_eq!(config.volume_discounts().len(), 3);
    }

    #[test]
    fn test_setters_reject_negative_and_non_finite() {
        let mut config = RateConfiguration::new();
        assert_eq!(
            config.set_domestic_rates(-1.0, 1.0),
            Err(ShippingError::InvalidRate {
                field: "domestic.base",
                value: -1.0
            })
        );
        assert!(config.set_express_rates(10.0, f64::INFINITY).is_err());
        assert!(config.set_insurance(10.0, -0.01).is_err());

        // Failed setters leave the configuration untouched
        assert_eq!(config, RateConfiguration::new());
    }

    #[test]
    fn test_setters_apply_values() {
        let mut config = RateConfiguration::new();
        config.set_domestic_rates(4.0, 0.5).unwrap();
        config.set_express_rates(25.0, 4.0).unwrap();
        config.set_insurance(10.0, 0.1).unwrap();
        assert_eq!(config.domestic_base_rate(), 4.0);
        assert_eq!(config.domestic_per_kg_rate(), 0.5);
        assert_eq!(config.express_base_rate(), 25.0);
        assert_eq!(config.express_per_kg_rate(), 4.0);
        assert_eq!(config.insurance_threshold(), 10.0);
        assert_eq!(config.insurance_rate(), 0.1);
    }
}
