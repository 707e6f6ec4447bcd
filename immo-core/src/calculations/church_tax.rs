//! Church tax (Kirchensteuer) as a surcharge on the income tax.

use rust_decimal::Decimal;

use crate::calculations::common::from_percent;

/// Church tax on `income_tax` at `rate` percent, or zero when not `applicable`.
///
/// The amount is not rounded.
///
/// ```
/// use rust_decimal_macros::dec;
/// use immo_core::calculations::church_tax;
///
/// assert_eq!(church_tax(dec!(14415), true, dec!(9)), dec!(1297.35));
/// assert_eq!(church_tax(dec!(14415), false, dec!(9)), dec!(0));
/// ```
pub fn church_tax(
    income_tax: Decimal,
    applicable: bool,
    rate: Decimal,
) -> Decimal {
    if !applicable {
        return Decimal::ZERO;
    }
    income_tax * from_percent(rate)
}
