pub mod calculator;
pub mod config;
pub mod error;
pub mod legacy;
pub mod rates;
pub mod validation;
pub mod zone;

pub use calculator::{
    compute_fee_v2, quote, round_to_cents, FeeAdjustment, FeeBreakdown, FeeQuote, MAX_WEIGHT_KG,
};
pub use config::{InsuranceConfig, RatesConfig, ZoneRates};
pub use error::ShippingError;
pub use legacy::compute_fee;
pub use rates::RateConfiguration;
pub use validation::validate_rates;
pub use zone::Zone;
