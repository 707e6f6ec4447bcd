//! Common utility functions for the projection calculations.
//!
//! Rounding helpers and percentage conversion shared by the tax, financing
//! and projection modules.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero. Used for cent
/// presentation; the projection itself carries full precision.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use immo_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole euros, midpoint away from zero.
///
/// The income-tax schedule is the only place that rounds during the
/// projection.
///
/// ```
/// use rust_decimal_macros::dec;
/// use immo_core::calculations::common::round_to_whole;
///
/// assert_eq!(round_to_whole(dec!(1015.5)), dec!(1016));
/// assert_eq!(round_to_whole(dec!(1015.49)), dec!(1015));
/// ```
pub fn round_to_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use immo_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Converts a whole-number percentage into a fraction (`5` → `0.05`).
pub fn from_percent(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        assert_eq!(round_half_up(dec!(999999.999)), dec!(1000000.00));
    }

    // =========================================================================
    // round_to_whole tests
    // =========================================================================

    #[test]
    fn round_to_whole_rounds_midpoint_up() {
        assert_eq!(round_to_whole(dec!(14414.5)), dec!(14415));
    }

    #[test]
    fn round_to_whole_rounds_below_midpoint_down() {
        assert_eq!(round_to_whole(dec!(14414.4999)), dec!(14414));
    }

    #[test]
    fn round_to_whole_keeps_zero() {
        assert_eq!(round_to_whole(Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
        assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        assert_eq!(max(dec!(-50.00), dec!(0)), dec!(0));
    }

    // =========================================================================
    // from_percent tests
    // =========================================================================

    #[test]
    fn from_percent_divides_by_hundred() {
        assert_eq!(from_percent(dec!(3.57)), dec!(0.0357));
        assert_eq!(from_percent(dec!(100)), Decimal::ONE);
    }
}
