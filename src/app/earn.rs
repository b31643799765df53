//! Stake amount entry and projected returns for the earn page

use crate::models::format_usd;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    #[error("Enter an amount first (press 'a')")]
    Empty,

    #[error("'{0}' is not a valid amount")]
    NotANumber(String),

    #[error("Minimum investment is {}", format_usd(*.minimum))]
    BelowMinimum { amount: f64, minimum: f64 },
}

/// Simple-interest earnings on a principal at a yearly APY
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectedReturns {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl ProjectedReturns {
    /// `apy` is a percentage, e.g. `7.2`
    pub fn new(principal: f64, apy: f64) -> Self {
        let rate = apy / 100.0;
        ProjectedReturns {
            daily: principal * rate / 365.0,
            monthly: principal * rate / 12.0,
            yearly: principal * rate,
        }
    }

    /// Projection for the raw input; anything unparseable counts as zero
    pub fn for_input(input: &str, apy: f64) -> Self {
        let principal = parse_number(input).unwrap_or(0.0);
        ProjectedReturns::new(principal, apy)
    }
}

/// Accepts `$` and thousands separators, e.g. `$12,500`
fn parse_number(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate a stake amount typed by the user against the pool minimum
pub fn parse_stake_amount(input: &str, minimum: f64) -> Result<f64, AmountError> {
    if input.trim().is_empty() {
        return Err(AmountError::Empty);
    }
    let amount = parse_number(input).ok_or_else(|| AmountError::NotANumber(input.trim().to_string()))?;
    if amount < minimum {
        return Err(AmountError::BelowMinimum { amount, minimum });
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stake_amount() {
        assert_eq!(parse_stake_amount("2500", 1000.0), Ok(2500.0));
        assert_eq!(parse_stake_amount(" $12,500.50 ", 1000.0), Ok(12_500.5));
        assert_eq!(parse_stake_amount("1000", 1000.0), Ok(1000.0));
    }

    #[test]
    fn test_rejects_bad_amounts() {
        assert_eq!(parse_stake_amount("   ", 1000.0), Err(AmountError::Empty));
        assert!(matches!(
            parse_stake_amount("ten", 1000.0),
            Err(AmountError::NotANumber(s)) if s == "ten"
        ));
        assert!(matches!(
            parse_stake_amount("inf", 1000.0),
            Err(AmountError::NotANumber(_))
        ));
        let err = parse_stake_amount("999.99", 1000.0).unwrap_err();
        assert_eq!(err.to_string(), "Minimum investment is $1,000.00");
    }

    #[test]
    fn test_projected_returns() {
        let r = ProjectedReturns::new(10_000.0, 7.3);
        assert!((r.yearly - 730.0).abs() < 1e-9);
        assert!((r.monthly - 730.0 / 12.0).abs() < 1e-9);
        assert!((r.daily - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_of_unparseable_input_is_zero() {
        assert_eq!(ProjectedReturns::for_input("abc", 9.1), ProjectedReturns::default());
        assert_eq!(ProjectedReturns::for_input("", 9.1).yearly, 0.0);
    }
}
