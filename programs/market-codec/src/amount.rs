//! Token unit conversions. Pools and liquidity are stored on-chain as raw
//! units of a 9-decimal mint; everything human-facing goes through here.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::EncodeError;

pub const TOKEN_DECIMALS: u32 = 9;
pub const TOKEN_SCALE: u64 = 1_000_000_000;

/// Scale a whole-token amount to raw units.
pub fn to_raw_amount(whole: u64) -> Result<u64, EncodeError> {
    whole
        .checked_mul(TOKEN_SCALE)
        .ok_or(EncodeError::AmountOverflow(whole))
}

/// Exact UI value of a raw amount.
pub fn to_ui_amount(raw: u64) -> Decimal {
    Decimal::from_i128_with_scale(raw as i128, TOKEN_DECIMALS)
}

/// Exact UI value of a raw amount wider than u64 (e.g. the sum of both pools).
pub fn to_ui_amount_wide(raw: u128) -> Decimal {
    // u64::MAX + u64::MAX still fits the 96-bit mantissa.
    Decimal::from_i128_with_scale(raw as i128, TOKEN_DECIMALS)
}

/// Lossy display value. Do not feed this back into on-chain amounts.
pub fn to_ui_f64(raw: u64) -> f64 {
    raw as f64 / TOKEN_SCALE as f64
}

/// Two-decimal display string, e.g. `"700.00"`.
pub fn format_ui(raw: u64) -> String {
    let rounded = to_ui_amount(raw).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_to_raw_amount() {
        assert_eq!(to_raw_amount(0).unwrap(), 0);
        assert_eq!(to_raw_amount(100).unwrap(), 100_000_000_000);

        let max_whole = u64::MAX / TOKEN_SCALE;
        assert_eq!(to_raw_amount(max_whole).unwrap(), max_whole * TOKEN_SCALE);
        assert_eq!(
            to_raw_amount(max_whole + 1),
            Err(EncodeError::AmountOverflow(max_whole + 1))
        );
    }

    #[test]
    fn test_ui_conversions() {
        assert_eq!(to_ui_amount(1_500_000_000), Decimal::from_str("1.5").unwrap());
        assert_eq!(to_ui_amount(1), Decimal::from_str("0.000000001").unwrap());
        assert_eq!(to_ui_f64(250_000_000), 0.25);
        assert_eq!(format_ui(700_000_000_000), "700.00");
        assert_eq!(format_ui(1_234_567_890), "1.23");
        assert_eq!(format_ui(1_235_000_000), "1.24");
    }

    #[test]
    fn test_wide_amount_does_not_overflow() {
        let total = u64::MAX as u128 * 2;
        let ui = to_ui_amount_wide(total);
        assert!(ui > to_ui_amount(u64::MAX));
    }
}
