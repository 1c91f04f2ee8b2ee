use std::io::IsTerminal;
use owo_colors::OwoColorize;

use crate::shipping::{round_to_cents, FeeQuote, RateConfiguration};
use crate::users::User;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an amount with exactly two decimals ("31.50")
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// One-line quote: "31.50  Domestic 25 kg"
pub fn format_quote_line(quote: &FeeQuote, use_colors: bool) -> String {
    let amount = format_amount(quote.fee);
    let code = quote
        .discount_code
        .as_deref()
        .map(|c| format!(" ({})", c))
        .unwrap_or_default();

    if use_colors {
        format!(
            "{}  {} {} kg{}",
            amount.bold(),
            quote.zone.cyan(),
            quote.weight,
            code.yellow()
        )
    } else {
        format!("{}  {} {} kg{}", amount, quote.zone, quote.weight, code)
    }
}

/// Multi-line quote showing every step (for verbose mode)
pub fn format_quote_detail(quote: &FeeQuote, use_colors: bool) -> String {
    let mut lines = vec![
        format!("Zone: {}", quote.zone),
        format!("Weight: {} kg", quote.weight),
        format!("Base fee: {}", format_amount(quote.breakdown.base_fee)),
    ];

    for adj in &quote.breakdown.adjustments {
        lines.push(format!(
            "{}: {} ({} -> {})",
            adj.label,
            adj.description,
            format_amount(adj.before),
            format_amount(adj.after)
        ));
    }

    let total = format_amount(quote.fee);
    if use_colors {
        lines.push(format!("Total: {}", total.bold().green()));
    } else {
        lines.push(format!("Total: {}", total));
    }
    lines.join("\n")
}

/// Human-readable dump of the effective rates
pub fn format_rates(rates: &RateConfiguration) -> String {
    let mut lines = vec![
        format!(
            "Domestic:  {} + {}/kg",
            rates.domestic_base_rate(),
            rates.domestic_per_kg_rate()
        ),
        format!(
            "Express:   {} + {}/kg",
            rates.express_base_rate(),
            rates.express_per_kg_rate()
        ),
        format!(
            "Insurance: {}% over {} kg",
            round_to_cents(rates.insurance_rate() * 100.0),
            rates.insurance_threshold()
        ),
    ];

    if rates.international_rates().is_empty() {
        lines.push("International: none registered".to_string());
    } else {
        lines.push("International:".to_string());
        for (zone, rate) in rates.international_rates() {
            lines.push(format!("  {}: {}/kg", zone, rate));
        }
    }

    lines.push("Discounts:".to_string());
    for (code, pct) in rates.volume_discounts() {
        lines.push(format!("  {}: {}", code, pct));
    }

    lines.join("\n")
}

/// Format a single user as one line: "{id}. {name} <{email}>"
pub fn format_user_line(user: &User, use_colors: bool) -> String {
    let index_str = format!("{:>3}.", user.id);
    if use_colors {
        format!(
            "{} {} <{}>  {}",
            index_str.dimmed(),
            user.name.bold(),
            user.email.cyan(),
            user.created_at.format("%Y-%m-%d").dimmed()
        )
    } else {
        format!(
            "{} {} <{}>  {}",
            index_str,
            user.name,
            user.email,
            user.created_at.format("%Y-%m-%d")
        )
    }
}

pub fn format_user_list(users: &[User], use_colors: bool) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    users
        .iter()
        .map(|u| format_user_line(u, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::quote;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: 7,
            email: "alice@example.com".to_string(),
            name: "Alice Smith".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_amount_pads_cents() {
        assert_eq!(format_amount(31.5), "31.50");
        assert_eq!(format_amount(80.0), "80.00");
    }

    #[test]
    fn test_format_quote_line() {
        let rates = RateConfiguration::new();
        let q = quote(&rates, 25.0, "Domestic", "SUMMER10").unwrap();
        assert_eq!(format_quote_line(&q, false), "28.35  Domestic 25 kg (SUMMER10)");
    }

    #[test]
    fn test_format_quote_detail() {
        let rates = RateConfiguration::new();
        let q = quote(&rates, 25.0, "Domestic", "").unwrap();
        let result = format_quote_detail(&q, false);
        assert!(result.contains("Base fee: 30.00"));
        assert!(result.contains("Insurance: 5% over 20 kg (30.00 -> 31.50)"));
        assert!(result.ends_with("Total: 31.50"));
    }

    #[test]
    fn test_format_rates_lists_everything() {
        let mut rates = RateConfiguration::new();
        rates.register_international_rate("International", 12.5);
        let result = format_rates(&rates);
        assert!(result.contains("Domestic:  5 + 1/kg"));
        assert!(result.contains("International: 12.5/kg"));
        assert!(result.contains("BULK20: 0.2"));
        assert!(result.contains("SUMMER10: 0.1"));
    }

    #[test]
    fn test_format_user_list() {
        assert_eq!(format_user_list(&[], false), "No users found.");
        let result = format_user_list(&[sample_user()], false);
        assert!(result.starts_with("  7. Alice Smith <alice@example.com>"));
    }
}
