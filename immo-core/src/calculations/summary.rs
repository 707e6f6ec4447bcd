//! Key figures over the whole holding period.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::amortization::AnnuityLoan;
use crate::models::YearRecord;

/// Errors from the summary calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("projection contains no years")]
    NoRecords,

    /// The return is undefined without positive initial equity.
    #[error("initial equity must be positive, got {0}")]
    NonPositiveInitialEquity(Decimal),

    /// A negative equity ratio has no real root.
    #[error("final equity is negative ({0}), annualized return is undefined")]
    NegativeFinalEquity(Decimal),

    #[error("annualized return could not be computed")]
    Overflow,
}

/// Scalar results of a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_cost: Decimal,
    pub initial_equity: Decimal,
    pub loan_amount: Decimal,
    pub annuity: Decimal,
    pub monthly_payment: Decimal,
    /// After-tax cashflow per month in year 1.
    pub monthly_cashflow: Decimal,
    pub final_property_value: Decimal,
    pub final_loan_balance: Decimal,
    pub final_equity: Decimal,
    pub equity_growth: Decimal,
    /// Geometric mean yearly growth of the equity as a fraction; `None` when undefined.
    pub annualized_roi: Option<Decimal>,
}

/// Geometric mean yearly return `(final / initial)^(1 / years) - 1`.
///
/// # Errors
///
/// Returns [`SummaryError`] if `initial_equity` is not positive, `final_equity`
/// is negative, `years` is zero or the power cannot be computed.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use immo_core::calculations::annualized_roi;
///
/// let roi = annualized_roi(dec!(100000), dec!(121000), 2).unwrap();
///
/// assert_eq!(roi.round_dp(6), dec!(0.1));
/// assert_eq!(annualized_roi(dec!(100000), dec!(0), 5), Ok(dec!(-1)));
/// assert!(annualized_roi(dec!(0), dec!(50000), 5).is_err());
/// ```
pub fn annualized_roi(
    initial_equity: Decimal,
    final_equity: Decimal,
    years: u32,
) -> Result<Decimal, SummaryError> {
    if initial_equity <= Decimal::ZERO {
        return Err(SummaryError::NonPositiveInitialEquity(initial_equity));
    }
    if final_equity < Decimal::ZERO {
        return Err(SummaryError::NegativeFinalEquity(final_equity));
    }
    if years == 0 {
        return Err(SummaryError::NoRecords);
    }

    let ratio = final_equity / initial_equity;
    if ratio.is_zero() {
        return Ok(-Decimal::ONE);
    }
    if years == 1 {
        return Ok(ratio - Decimal::ONE);
    }

    let exponent = Decimal::ONE / Decimal::from(years);
    let growth = ratio.checked_powd(exponent).ok_or(SummaryError::Overflow)?;
    Ok(growth - Decimal::ONE)
}

/// Builds a [`ProjectionSummary`] from the projected years.
#[derive(Debug, Clone)]
pub struct SummaryAggregator<'a> {
    total_cost: Decimal,
    initial_equity: Decimal,
    loan: &'a AnnuityLoan,
}

impl<'a> SummaryAggregator<'a> {
    pub fn new(
        total_cost: Decimal,
        initial_equity: Decimal,
        loan: &'a AnnuityLoan,
    ) -> Self {
        Self {
            total_cost,
            initial_equity,
            loan,
        }
    }

    /// Summarises `records`, which must be in year order.
    ///
    /// An undefined annualized return is stored as `None` rather than failing
    /// the summary.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::NoRecords`] for an empty projection.
    pub fn calculate(
        &self,
        records: &[YearRecord],
    ) -> Result<ProjectionSummary, SummaryError> {
        let (first, last) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(SummaryError::NoRecords),
        };

        let years = u32::try_from(records.len()).map_err(|_| SummaryError::Overflow)?;
        let annualized_roi = annualized_roi(self.initial_equity, last.equity, years).ok();

        Ok(ProjectionSummary {
            total_cost: self.total_cost,
            initial_equity: self.initial_equity,
            loan_amount: self.loan.amount,
            annuity: self.loan.annuity(),
            monthly_payment: self.loan.monthly_payment(),
            monthly_cashflow: first.monthly_cashflow_after_tax(),
            final_property_value: last.property_value,
            final_loan_balance: last.loan_balance,
            final_equity: last.equity,
            equity_growth: last.equity - self.initial_equity,
            annualized_roi,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // annualized_roi tests
    // =========================================================================

    #[test]
    fn roi_over_one_year_is_simple_return() {
        assert_eq!(annualized_roi(dec!(50000), dec!(55000), 1), Ok(dec!(0.1)));
    }

    #[test]
    fn roi_is_geometric_mean() {
        let roi = annualized_roi(dec!(100000), dec!(133100), 3).unwrap();

        assert_eq!(roi.round_dp(6), dec!(0.1));
    }

    #[test]
    fn roi_of_constant_equity_is_zero() {
        let roi = annualized_roi(dec!(60000), dec!(60000), 10).unwrap();

        assert_eq!(roi.round_dp(8), Decimal::ZERO);
    }

    #[test]
    fn roi_of_lost_equity_is_minus_one() {
        assert_eq!(annualized_roi(dec!(60000), Decimal::ZERO, 10), Ok(dec!(-1)));
    }

    #[test]
    fn roi_requires_positive_initial_equity() {
        assert_eq!(
            annualized_roi(Decimal::ZERO, dec!(1000), 10),
            Err(SummaryError::NonPositiveInitialEquity(Decimal::ZERO))
        );
        assert_eq!(
            annualized_roi(dec!(-5), dec!(1000), 10),
            Err(SummaryError::NonPositiveInitialEquity(dec!(-5)))
        );
    }

    #[test]
    fn roi_rejects_negative_final_equity() {
        assert_eq!(
            annualized_roi(dec!(60000), dec!(-10), 10),
            Err(SummaryError::NegativeFinalEquity(dec!(-10)))
        );
    }

    // =========================================================================
    // aggregator tests
    // =========================================================================

    #[test]
    fn empty_projection_has_no_summary() {
        let loan = AnnuityLoan::none();

        assert_eq!(
            SummaryAggregator::new(dec!(100000), dec!(100000), &loan).calculate(&[]),
            Err(SummaryError::NoRecords)
        );
    }

    #[test]
    fn roi_error_becomes_none() {
        assert_eq!(annualized_roi(Decimal::ZERO, dec!(10), 3).ok(), None);
    }
}
