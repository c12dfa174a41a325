use std::str::FromStr;

use rust_decimal::Decimal;

use crate::server::error::validation::ValidationError;

/// Parses a decimal amount sent as a string; `field` names the payload field in the error.
pub fn parse_amount(value: &str, field: &'static str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(value.trim()).map_err(|_| ValidationError::InvalidNumber(field))
}

/// `amount * (percentage / 100)` rounded to cents.
pub fn tax_value(amount: Decimal, percentage: Decimal) -> Decimal {
    (amount * (percentage / Decimal::ONE_HUNDRED)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::server::error::validation::ValidationError;

    /// Expect decimal strings to parse exactly
    #[test]
    fn parses_decimal_strings() {
        assert_eq!(
            parse_amount("1500.50", "AssetValue").unwrap(),
            Decimal::new(150050, 2)
        );
        assert!(matches!(
            parse_amount("12,5", "AssetValue"),
            Err(ValidationError::InvalidNumber("AssetValue"))
        ));
    }

    /// Expect the tax value to be computed without float drift
    #[test]
    fn computes_tax_value() {
        let value = tax_value(Decimal::new(100000, 2), Decimal::new(18, 0));

        assert_eq!(value, Decimal::new(18000, 2));
        assert_eq!(
            tax_value(Decimal::new(1, 1), Decimal::new(3, 0)),
            Decimal::ZERO
        );
    }
}
