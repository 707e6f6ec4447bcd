//! Year-1 rental income and operating cost baseline.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::from_percent;
use crate::models::{OngoingCosts, OperatingCosts};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Rent and running costs before any escalation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngoingCostBaseline {
    pub annual_rent: Decimal,
    pub vacancy_loss: Decimal,
    pub effective_rent: Decimal,
    pub operating_costs: OperatingCosts,
    pub total_ongoing: Decimal,
}

impl OngoingCostBaseline {
    /// Effective rent minus operating costs.
    pub fn cashflow_before_financing(&self) -> Decimal {
        self.effective_rent - self.total_ongoing
    }
}

/// Computes the [`OngoingCostBaseline`].
///
/// ```
/// use rust_decimal_macros::dec;
/// use immo_core::OngoingCosts;
/// use immo_core::calculations::OngoingCostModel;
///
/// let costs = OngoingCosts {
///     monthly_rent: dec!(1200),
///     vacancy_rate: dec!(3),
///     property_tax: dec!(400),
///     management_fee: dec!(300),
///     maintenance_reserve_per_area: dec!(5),
///     property_size: dec!(70),
///     insurance: dec!(150),
/// };
///
/// let baseline = OngoingCostModel::new(&costs).calculate();
///
/// assert_eq!(baseline.effective_rent, dec!(13968));
/// assert_eq!(baseline.total_ongoing, dec!(1200));
/// ```
#[derive(Debug, Clone)]
pub struct OngoingCostModel<'a> {
    costs: &'a OngoingCosts,
}

impl<'a> OngoingCostModel<'a> {
    pub fn new(costs: &'a OngoingCosts) -> Self {
        Self { costs }
    }

    pub fn calculate(&self) -> OngoingCostBaseline {
        let annual_rent = self.costs.monthly_rent * MONTHS_PER_YEAR;
        let vacancy_loss = annual_rent * from_percent(self.costs.vacancy_rate);
        let operating_costs = self.costs.operating_costs();

        OngoingCostBaseline {
            annual_rent,
            vacancy_loss,
            effective_rent: annual_rent - vacancy_loss,
            total_ongoing: operating_costs.total(),
            operating_costs,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn costs() -> OngoingCosts {
        OngoingCosts {
            monthly_rent: dec!(1200),
            vacancy_rate: dec!(3),
            property_tax: dec!(400),
            management_fee: dec!(300),
            maintenance_reserve_per_area: dec!(5),
            property_size: dec!(70),
            insurance: dec!(150),
        }
    }

    #[test]
    fn baseline_from_reference_costs() {
        let baseline = OngoingCostModel::new(&costs()).calculate();

        assert_eq!(baseline.annual_rent, dec!(14400));
        assert_eq!(baseline.vacancy_loss, dec!(432));
        assert_eq!(baseline.effective_rent, dec!(13968));
        assert_eq!(baseline.operating_costs.maintenance_reserve, dec!(350));
        assert_eq!(baseline.total_ongoing, dec!(1200));
        assert_eq!(baseline.cashflow_before_financing(), dec!(12768));
    }

    #[test]
    fn no_vacancy_keeps_full_rent() {
        let mut c = costs();
        c.vacancy_rate = Decimal::ZERO;

        let baseline = OngoingCostModel::new(&c).calculate();

        assert_eq!(baseline.effective_rent, baseline.annual_rent);
        assert_eq!(baseline.vacancy_loss, Decimal::ZERO);
    }
}
