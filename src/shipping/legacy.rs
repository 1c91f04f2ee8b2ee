use super::calculator::validate_weight;
use super::error::ShippingError;
use super::rates::{
    DEFAULT_DOMESTIC_BASE_RATE, DEFAULT_DOMESTIC_PER_KG_RATE, DEFAULT_EXPRESS_BASE_RATE,
    DEFAULT_EXPRESS_PER_KG_RATE,
};
use super::zone::Zone;

/// Fixed-rate fee for `weight` kilograms shipped to `zone`.
///
/// Uses the default domestic and express rates, applies no insurance or
/// discount, and returns the raw sum without rounding. International
/// shipping is not supported here; use [`super::compute_fee_v2`].
pub fn compute_fee(weight: f64, zone: &str) -> Result<f64, ShippingError> {
    validate_weight(weight)?;

    match Zone::parse(zone)? {
        Zone::Domestic => Ok(DEFAULT_DOMESTIC_BASE_RATE + weight * DEFAULT_DOMESTIC_PER_KG_RATE),
        Zone::Express => Ok(DEFAULT_EXPRESS_BASE_RATE + weight * DEFAULT_EXPRESS_PER_KG_RATE),
        Zone::International => Err(ShippingError::NotImplemented {
            zone: zone.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_domestic_fee() {
        assert_eq!(compute_fee(25.0, "Domestic").unwrap(), 30.0);
        assert_eq!(compute_fee(10.0, "Domestic").unwrap(), 15.0);
    }

    #[test]
    fn test_express_fee() {
        assert_eq!(compute_fee(10.0, "Express").unwrap(), 80.0);
    }

    #[test]
    fn test_international_not_implemented() {
        assert_eq!(
            compute_fee(10.0, "International"),
            Err(ShippingError::NotImplemented {
                zone: "International".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_zone() {
        assert_eq!(
            compute_fee(10.0, "Bogus"),
            Err(ShippingError::UnknownZone {
                zone: "Bogus".to_string()
            })
        );
    }

    #[test]
    fn test_weight_boundaries() {
        assert!(compute_fee(-0.01, "Domestic").is_err());
        assert!(compute_fee(0.0, "Domestic").is_err());
        assert_close(compute_fee(0.01, "Domestic").unwrap(), 5.01);
        assert_eq!(compute_fee(50.0, "Domestic").unwrap(), 55.0);
        assert_eq!(
            compute_fee(50.01, "Domestic"),
            Err(ShippingError::InvalidWeight { weight: 50.01 })
        );
    }

    #[test]
    fn test_invalid_weight_wins_over_zone() {
        for zone in ["Domestic", "Express", "International", "Bogus"] {
            assert!(matches!(
                compute_fee(-1.0, zone),
                Err(ShippingError::InvalidWeight { .. })
            ));
            assert!(matches!(
                compute_fee(51.0, zone),
                Err(ShippingError::InvalidWeight { .. })
            ));
        }
    }

    #[test]
    fn test_no_rounding_applied() {
        // 5 + 0.333 stays unrounded
        assert_close(compute_fee(0.333, "Domestic").unwrap(), 5.333);
    }
}
