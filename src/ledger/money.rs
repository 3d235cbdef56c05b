//! Exact monetary arithmetic. Amounts are `rust_decimal::Decimal` in the
//! domain and integer cents in storage; rates are percentages in [0,100]
//! stored as basis points. Binary floats never touch money.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::ledger::error::LedgerError;

/// Converts a decimal amount into integer cents.
///
/// Rejects anything with more than two fractional digits instead of silently
/// rounding: a caller-supplied `10.005` is malformed input, not a deposit.
pub fn to_cents(amount: Decimal) -> Result<i64, LedgerError> {
    let scaled = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(LedgerError::InvalidAmount)?;
    if scaled.fract() != Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    scaled.to_i64().ok_or(LedgerError::InvalidAmount)
}

/// Converts stored cents back into a two-decimal amount.
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Converts a percentage rate in [0,100] into basis points for storage.
pub fn rate_to_basis_points(rate: Decimal) -> Result<i64, LedgerError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(LedgerError::InvalidAmount);
    }
    let scaled = rate * Decimal::ONE_HUNDRED;
    if scaled.fract() != Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    scaled.to_i64().ok_or(LedgerError::InvalidAmount)
}

/// Converts stored basis points back into a percentage.
pub fn rate_from_basis_points(bp: i64) -> Decimal {
    Decimal::new(bp, 2)
}

/// The one rounding rule for computed amounts: half-even to two decimal
/// places. Every tax computation goes through here so the value that is
/// subtracted from gross is identical to the value that is stored.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cents_round_trip() {
        assert_eq!(to_cents(dec!(1234.56)).unwrap(), 123_456);
        assert_eq!(from_cents(123_456), dec!(1234.56));
        assert_eq!(to_cents(dec!(0.01)).unwrap(), 1);
        assert_eq!(to_cents(dec!(-5)).unwrap(), -500);
    }

    #[test]
    fn sub_cent_amounts_are_rejected() {
        assert!(matches!(
            to_cents(dec!(10.005)),
            Err(LedgerError::InvalidAmount)
        ));
    }

    #[test]
    fn rounding_is_half_even() {
        assert_eq!(round_amount(dec!(0.125)), dec!(0.12));
        assert_eq!(round_amount(dec!(0.135)), dec!(0.14));
        assert_eq!(round_amount(dec!(10.001)), dec!(10.00));
    }

    #[test]
    fn rates_round_trip_in_basis_points() {
        assert_eq!(rate_to_basis_points(dec!(10.00)).unwrap(), 1000);
        assert_eq!(rate_to_basis_points(dec!(0.25)).unwrap(), 25);
        assert_eq!(rate_from_basis_points(1000), dec!(10.00));
    }

    #[test]
    fn out_of_range_rates_are_rejected() {
        assert!(rate_to_basis_points(dec!(100.01)).is_err());
        assert!(rate_to_basis_points(dec!(-1)).is_err());
        assert!(rate_to_basis_points(dec!(12.345)).is_err());
    }
}
