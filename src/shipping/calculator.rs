use serde::Serialize;

use super::error::ShippingError;
use super::rates::RateConfiguration;
use super::zone::Zone;

/// Heaviest accepted package, in kilograms (inclusive).
pub const MAX_WEIGHT_KG: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeAdjustment {
    pub label: String,       // e.g. "Insurance", "Discount"
    pub description: String, // e.g. "5% over 20 kg", "SUMMER10 -10%"
    pub before: f64,
    pub after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeBreakdown {
    pub base_fee: f64,
    pub adjustments: Vec<FeeAdjustment>,
    pub unrounded: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeQuote {
    pub weight: f64,
    pub zone: Zone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub fee: f64,
    pub breakdown: FeeBreakdown,
}

/// Reject weights outside `(0, MAX_WEIGHT_KG]`, including NaN.
pub fn validate_weight(weight: f64) -> Result<(), ShippingError> {
    if weight > 0.0 && weight <= MAX_WEIGHT_KG {
        Ok(())
    } else {
        Err(ShippingError::InvalidWeight { weight })
    }
}

/// Round to whole cents, halves away from zero (`0.125` -> `0.13`).
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Fee for `weight` kilograms shipped to `zone` under `config`.
///
/// An empty `discount_code` means no discount.
pub fn compute_fee_v2(
    config: &RateConfiguration,
    weight: f64,
    zone: &str,
    discount_code: &str,
) -> Result<f64, ShippingError> {
    quote(config, weight, zone, discount_code).map(|q| q.fee)
}

/// Same computation as [`compute_fee_v2`], keeping every intermediate amount.
///
/// Order of operations:
/// 1. weight check
/// 2. zone base fee
/// 3. insurance surcharge when `weight > insurance_threshold`
/// 4. discount, applied to the insured amount
/// 5. rounding to cents
pub fn quote(
    config: &RateConfiguration,
    weight: f64,
    zone: &str,
    discount_code: &str,
) -> Result<FeeQuote, ShippingError> {
    validate_weight(weight)?;

    let zone_kind = Zone::parse(zone)?;
    let base_fee = match zone_kind {
        Zone::Domestic => config.domestic_base_rate() + weight * config.domestic_per_kg_rate(),
        Zone::Express => config.express_base_rate() + weight * config.express_per_kg_rate(),
        // Keyed by the zone name itself, which can only be "International" here.
        Zone::International => match config.international_rate(zone) {
            Some(rate) => rate * weight,
            None => {
                return Err(ShippingError::RateUnavailable {
                    zone: zone.to_string(),
                })
            }
        },
    };

    let mut fee = base_fee;
    let mut adjustments = Vec::new();

    if weight > config.insurance_threshold() {
        let before = fee;
        fee += fee * config.insurance_rate();
        adjustments.push(FeeAdjustment {
            label: "Insurance".to_string(),
            description: format!(
                "{}% over {} kg",
                round_to_cents(config.insurance_rate() * 100.0),
                config.insurance_threshold()
            ),
            before,
            after: fee,
        });
    }

    let discount_code = if discount_code.is_empty() {
        None
    } else {
        let discount = config
            .discount(discount_code)
            .ok_or_else(|| ShippingError::UnknownDiscountCode {
                code: discount_code.to_string(),
            })?;
        let before = fee;
        fee *= 1.0 - discount;
        adjustments.push(FeeAdjustment {
            label: "Discount".to_string(),
            description: format!("{} -{}%", discount_code, round_to_cents(discount * 100.0)),
            before,
            after: fee,
        });
        Some(discount_code.to_string())
    };

    Ok(FeeQuote {
        weight,
        zone: zone_kind,
        discount_code,
        fee: round_to_cents(fee),
        breakdown: FeeBreakdown {
            base_fee,
            adjustments,
            unrounded: fee,
        },
    })
}
