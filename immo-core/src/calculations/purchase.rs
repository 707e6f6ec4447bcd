//! One-time acquisition costs and the purchase price allocation.
//!
//! The extra costs of a purchase (Kaufnebenkosten) are transfer tax, notary
//! and broker fee, each a percentage of the purchase price. The capitalised
//! part of these costs is split onto land and building in proportion to
//! their share of the price. When the broker fee is treated as a consulting
//! service it is left out of the capitalised costs and deducted in year 1.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use immo_core::PurchaseCost;
//! use immo_core::calculations::PurchaseCostModel;
//!
//! let purchase = PurchaseCost {
//!     purchase_price: dec!(300000),
//!     transfer_tax_rate: dec!(5),
//!     notary_rate: dec!(1.5),
//!     broker_rate: dec!(3.57),
//!     land_value: dec!(60000),
//!     building_value: dec!(220000),
//!     furniture_value: dec!(20000),
//!     maintenance_cost: dec!(10000),
//!     maintenance_distribution_years: 5,
//!     broker_as_consulting: false,
//! };
//!
//! let breakdown = PurchaseCostModel::new(&purchase).calculate();
//!
//! assert_eq!(breakdown.total_cost, dec!(330210));
//! assert_eq!(breakdown.first_year_deductible_costs, dec!(0));
//! assert!(breakdown.allocation_warning.is_none());
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::PurchaseCost;

/// Largest accepted gap between the allocated components and the purchase price.
pub const ALLOCATION_TOLERANCE: Decimal = Decimal::ONE;

/// Land, building and furniture do not add up to the purchase price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationWarning {
    pub purchase_price: Decimal,
    pub allocated_total: Decimal,
}

impl AllocationWarning {
    /// Allocated total minus purchase price.
    pub fn difference(&self) -> Decimal {
        self.allocated_total - self.purchase_price
    }
}

impl fmt::Display for AllocationWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "purchase price allocation ({}) does not match the purchase price ({})",
            self.allocated_total.round_dp(2),
            self.purchase_price.round_dp(2)
        )
    }
}

/// Derived acquisition figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseCostBreakdown {
    pub purchase_price: Decimal,
    pub transfer_tax: Decimal,
    pub notary_costs: Decimal,
    pub broker_fee: Decimal,
    pub total_extra_costs: Decimal,
    pub total_cost: Decimal,

    /// Land value in percent of the purchase price.
    pub land_share: Decimal,
    /// Building value in percent of the purchase price.
    pub building_share: Decimal,
    /// Extra costs added to the acquisition cost of land and building.
    pub capitalized_extra_costs: Decimal,
    pub land_extra_costs: Decimal,
    pub building_extra_costs: Decimal,
    pub total_land_value: Decimal,
    pub total_building_value: Decimal,

    pub building_value: Decimal,
    pub furniture_value: Decimal,
    /// Broker fee deducted in year 1 when treated as consulting.
    pub first_year_deductible_costs: Decimal,
    pub annual_maintenance_deduction: Decimal,

    pub allocation_warning: Option<AllocationWarning>,
}

/// Computes a [`PurchaseCostBreakdown`] from the acquisition inputs.
#[derive(Debug, Clone)]
pub struct PurchaseCostModel<'a> {
    purchase: &'a PurchaseCost,
}

impl<'a> PurchaseCostModel<'a> {
    pub fn new(purchase: &'a PurchaseCost) -> Self {
        Self { purchase }
    }

    /// Computes every derived figure.
    ///
    /// The purchase price must be positive; [`PurchaseCost::validate`]
    /// guarantees this for validated input.
    pub fn calculate(&self) -> PurchaseCostBreakdown {
        let p = self.purchase;

        let transfer_tax = p.transfer_tax();
        let notary_costs = p.notary_costs();
        let broker_fee = p.broker_fee();
        let total_extra_costs = p.total_extra_costs();

        let capitalized_extra_costs = self.capitalized_extra_costs();
        let land_ratio = self.ratio(p.land_value);
        let building_ratio = self.ratio(p.building_value);
        let land_extra_costs = capitalized_extra_costs * land_ratio;
        let building_extra_costs = capitalized_extra_costs * building_ratio;

        PurchaseCostBreakdown {
            purchase_price: p.purchase_price,
            transfer_tax,
            notary_costs,
            broker_fee,
            total_extra_costs,
            total_cost: p.total_cost(),
            land_share: land_ratio * Decimal::ONE_HUNDRED,
            building_share: building_ratio * Decimal::ONE_HUNDRED,
            capitalized_extra_costs,
            land_extra_costs,
            building_extra_costs,
            total_land_value: p.land_value + land_extra_costs,
            total_building_value: p.building_value + building_extra_costs,
            building_value: p.building_value,
            furniture_value: p.furniture_value,
            first_year_deductible_costs: self.first_year_deductible_costs(),
            annual_maintenance_deduction: p.annual_maintenance_deduction(),
            allocation_warning: self.allocation_warning(),
        }
    }

    /// Checks that land, building and furniture add up to the purchase price.
    ///
    /// A mismatch is logged and returned but never stops the calculation.
    pub fn allocation_warning(&self) -> Option<AllocationWarning> {
        let p = self.purchase;
        let allocated_total = p.allocated_total();

        if (allocated_total - p.purchase_price).abs() <= ALLOCATION_TOLERANCE {
            return None;
        }

        warn!(
            purchase_price = %p.purchase_price,
            allocated_total = %allocated_total,
            "purchase price allocation does not add up"
        );
        Some(AllocationWarning {
            purchase_price: p.purchase_price,
            allocated_total,
        })
    }

    fn capitalized_extra_costs(&self) -> Decimal {
        let p = self.purchase;
        if p.broker_as_consulting {
            p.transfer_tax() + p.notary_costs()
        } else {
            p.total_extra_costs()
        }
    }

    fn first_year_deductible_costs(&self) -> Decimal {
        if self.purchase.broker_as_consulting {
            self.purchase.broker_fee()
        } else {
            Decimal::ZERO
        }
    }

    fn ratio(
        &self,
        component: Decimal,
    ) -> Decimal {
        if self.purchase.purchase_price.is_zero() {
            return Decimal::ZERO;
        }
        component / self.purchase.purchase_price
    }
}
