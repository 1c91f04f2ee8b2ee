use thiserror::Error;

/// Failures produced by fee computation and rate configuration.
///
/// Every variant carries the offending input so callers can branch on the
/// kind without matching on message text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShippingError {
    #[error("invalid weight: {weight} kg (must be greater than 0 and at most 50 kg)")]
    InvalidWeight { weight: f64 },

    #[error("invalid zone: {zone}")]
    UnknownZone { zone: String },

    #[error("{zone} shipping not implemented")]
    NotImplemented { zone: String },

    #[error("shipping rate not available for zone: {zone}")]
    RateUnavailable { zone: String },

    #[error("invalid discount code: {code}")]
    UnknownDiscountCode { code: String },

    #[error("discount percentage must be between 0 and 1 (exclusive), got {percentage}")]
    InvalidDiscountPercentage { percentage: f64 },

    #[error("{field} must be a non-negative number, got {value}")]
    InvalidRate { field: &'static str, value: f64 },
}
