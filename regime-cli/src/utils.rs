use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and removes commas (thousands separator, including the
/// lakh grouping `10,00,000`).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into an amount.
///
/// Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseAmountError {
        input: s.to_string(),
        source: e,
    })
}

/// Lenient form of [`parse_amount`] for user-entered figures.
///
/// Unparseable input becomes 0 and is logged. Negative values pass through;
/// the core clamps them.
pub fn normalize_amount(
    field: &'static str,
    s: &str,
) -> Decimal {
    parse_amount(s).unwrap_or_else(|e| {
        tracing::warn!(field, input = %s, "{}; using 0", e);
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_amount_accepts_comma_separators() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("10,00,000").unwrap(), dec!(1000000));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  75000  ").unwrap(), dec!(75000));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn normalize_amount_falls_back_to_zero() {
        assert_eq!(normalize_amount("gross_salary", "twelve lakh"), Decimal::ZERO);
        assert_eq!(normalize_amount("gross_salary", "12,00,000"), dec!(1200000));
    }

    #[test]
    fn normalize_amount_keeps_negative_values() {
        assert_eq!(normalize_amount("other_income", "-5,000"), dec!(-5000));
    }
}
