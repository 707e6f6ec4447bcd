use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::from_percent;
use crate::models::InputError;
use crate::models::projection_input::{ensure_non_negative, ensure_percentage};

/// One-time acquisition inputs.
///
/// Rates are whole-number percentages of the purchase price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseCost {
    pub purchase_price: Decimal,
    /// Grunderwerbsteuer, e.g. `5` for 5 %.
    pub transfer_tax_rate: Decimal,
    pub notary_rate: Decimal,
    pub broker_rate: Decimal,
    pub land_value: Decimal,
    pub building_value: Decimal,
    pub furniture_value: Decimal,
    /// Lump maintenance expense (Erhaltungsaufwand) deducted over
    /// `maintenance_distribution_years`.
    pub maintenance_cost: Decimal,
    pub maintenance_distribution_years: u32,
    /// When set, the broker fee is deducted in year 1 instead of being
    /// capitalised onto land and building.
    pub broker_as_consulting: bool,
}

impl PurchaseCost {
    pub fn transfer_tax(&self) -> Decimal {
        self.purchase_price * from_percent(self.transfer_tax_rate)
    }

    pub fn notary_costs(&self) -> Decimal {
        self.purchase_price * from_percent(self.notary_rate)
    }

    pub fn broker_fee(&self) -> Decimal {
        self.purchase_price * from_percent(self.broker_rate)
    }

    pub fn total_extra_costs(&self) -> Decimal {
        self.transfer_tax() + self.notary_costs() + self.broker_fee()
    }

    pub fn total_cost(&self) -> Decimal {
        self.purchase_price + self.total_extra_costs()
    }

    /// Sum of the land, building and furniture components.
    pub fn allocated_total(&self) -> Decimal {
        self.land_value + self.building_value + self.furniture_value
    }

    /// Yearly share of the maintenance expense. Zero when the distribution
    /// period is zero; [`PurchaseCost::validate`] rejects that case.
    pub fn annual_maintenance_deduction(&self) -> Decimal {
        if self.maintenance_distribution_years == 0 {
            return Decimal::ZERO;
        }
        self.maintenance_cost / Decimal::from(self.maintenance_distribution_years)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        if self.purchase_price <= Decimal::ZERO {
            return Err(InputError::NonPositivePurchasePrice(self.purchase_price));
        }
        ensure_non_negative("purchase_price", self.purchase_price)?;
        ensure_percentage("transfer_tax_rate", self.transfer_tax_rate)?;
        ensure_percentage("notary_rate", self.notary_rate)?;
        ensure_percentage("broker_rate", self.broker_rate)?;
        ensure_non_negative("land_value", self.land_value)?;
        ensure_non_negative("building_value", self.building_value)?;
        ensure_non_negative("furniture_value", self.furniture_value)?;
        ensure_non_negative("maintenance_cost", self.maintenance_cost)?;
        if self.maintenance_distribution_years == 0 {
            return Err(InputError::ZeroMaintenanceDistribution);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn purchase() -> PurchaseCost {
        PurchaseCost {
            purchase_price: dec!(300000),
            transfer_tax_rate: dec!(5),
            notary_rate: dec!(1.5),
            broker_rate: dec!(3.57),
            land_value: dec!(60000),
            building_value: dec!(220000),
            furniture_value: dec!(20000),
            maintenance_cost: dec!(10000),
            maintenance_distribution_years: 5,
            broker_as_consulting: false,
        }
    }

    #[test]
    fn derived_costs_follow_rates() {
        let p = purchase();

        assert_eq!(p.transfer_tax(), dec!(15000));
        assert_eq!(p.notary_costs(), dec!(4500));
        assert_eq!(p.broker_fee(), dec!(10710));
        assert_eq!(p.total_extra_costs(), dec!(30210));
        assert_eq!(p.total_cost(), dec!(330210));
    }

    #[test]
    fn maintenance_is_spread_evenly() {
        assert_eq!(purchase().annual_maintenance_deduction(), dec!(2000));
    }

    #[test]
    fn validate_rejects_zero_distribution_years() {
        let mut p = purchase();
        p.maintenance_distribution_years = 0;

        assert_eq!(p.validate(), Err(InputError::ZeroMaintenanceDistribution));
        assert_eq!(p.annual_maintenance_deduction(), Decimal::ZERO);
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let mut p = purchase();
        p.purchase_price = Decimal::ZERO;

        assert_eq!(
            p.validate(),
            Err(InputError::NonPositivePurchasePrice(Decimal::ZERO))
        );
    }

    #[test]
    fn validate_rejects_negative_building_value() {
        let mut p = purchase();
        p.building_value = dec!(-1);

        assert_eq!(
            p.validate(),
            Err(InputError::NegativeAmount {
                field: "building_value",
                value: dec!(-1),
            })
        );
    }
}
