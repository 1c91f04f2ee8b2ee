use super::config::RatesConfig;

/// Validate the rate section of the config at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rates(config: &RatesConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let zones = [("domestic", &config.domestic), ("express", &config.express)];
    for (name, zone) in zones {
        if let Some(rates) = zone {
            check_non_negative(&mut errors, &format!("rates.{}.base", name), rates.base);
            check_non_negative(&mut errors, &format!("rates.{}.per_kg", name), rates.per_kg);
        }
    }

    if let Some(ref insurance) = config.insurance {
        check_non_negative(&mut errors, "rates.insurance.threshold", insurance.threshold);
        check_non_negative(&mut errors, "rates.insurance.rate", insurance.rate);
    }

    for (zone, rate) in &config.international {
        check_non_negative(&mut errors, &format!("rates.international.{}", zone), *rate);
    }

    for (code, pct) in &config.discounts {
        if code.is_empty() {
            errors.push("rates.discounts: code must not be empty".to_string());
        }
        if !(*pct > 0.0 && *pct < 1.0) {
            errors.push(format!(
                "rates.discounts.{}: must be between 0 and 1 (exclusive), got {}",
                code, pct
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_non_negative(errors: &mut Vec<String>, path: &str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(format!("{}: must be a non-negative number, got {}", path, value));
    }
}
