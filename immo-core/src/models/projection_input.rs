use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FinancingTerms, OngoingCosts, PurchaseCost, TaxStatus};

/// Longest holding period that can be projected.
pub const MAX_HOLDING_PERIOD_YEARS: u32 = 100;

/// Largest accepted amount or quantity, one quadrillion.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Reasons a [`ProjectionInput`] is rejected before any year is projected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("purchase price must be positive, got {0}")]
    NonPositivePurchasePrice(Decimal),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} must not exceed {max}, got {value}", max = MAX_AMOUNT)]
    AmountTooLarge { field: &'static str, value: Decimal },

    #[error("{field} must be a percentage between 0 and 100, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    #[error("vacancy rate must be at least 0 and below 100 percent, got {0}")]
    InvalidVacancyRate(Decimal),

    #[error("{field} must be greater than -100 percent, got {value}")]
    InvalidGrowthRate { field: &'static str, value: Decimal },

    #[error("maintenance must be distributed over at least one year")]
    ZeroMaintenanceDistribution,

    #[error("holding period must be at least one year")]
    ZeroHoldingPeriod,

    #[error("holding period of {0} years exceeds the maximum of {max}", max = MAX_HOLDING_PERIOD_YEARS)]
    HoldingPeriodTooLong(u32),

    #[error("down payment {down_payment} exceeds total acquisition cost {total_cost}")]
    DownPaymentExceedsTotalCost {
        down_payment: Decimal,
        total_cost: Decimal,
    },
}

pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), InputError> {
    if value < Decimal::ZERO {
        return Err(InputError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(InputError::AmountTooLarge { field, value });
    }
    Ok(())
}

pub(crate) fn ensure_percentage(
    field: &'static str,
    value: Decimal,
) -> Result<(), InputError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(InputError::RateOutOfRange { field, value });
    }
    Ok(())
}

fn ensure_growth_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), InputError> {
    if value <= -Decimal::ONE_HUNDRED {
        return Err(InputError::InvalidGrowthRate { field, value });
    }
    Ok(())
}

/// Yearly depreciation (AfA) rates in percent of the asset value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationRates {
    pub building_rate: Decimal,
    pub furniture_rate: Decimal,
}

/// The investor's personal tax situation before buying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    /// Taxable income without the property (zu versteuerndes Einkommen).
    pub annual_income: Decimal,
    pub status: TaxStatus,
    pub church_tax: bool,
    /// Church tax in percent of the income tax, usually 8 or 9.
    pub church_tax_rate: Decimal,
}

/// Market assumptions and the length of the holding period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// Yearly property appreciation in percent; may be negative.
    pub appreciation_rate: Decimal,
    /// Yearly increase of rent and operating costs in percent; may be negative.
    pub rent_increase_rate: Decimal,
    pub period_years: u32,
}

/// Everything the projection needs, gathered once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub purchase: PurchaseCost,
    pub ongoing: OngoingCosts,
    pub financing: FinancingTerms,
    pub depreciation: DepreciationRates,
    pub tax: TaxProfile,
    pub projection: ProjectionAssumptions,
}

impl ProjectionInput {
    /// Checks every field and returns the first violation.
    ///
    /// A purchase price allocation that does not add up is not an error; it
    /// is reported as a warning on the projection result.
    pub fn validate(&self) -> Result<(), InputError> {
        self.purchase.validate()?;
        self.ongoing.validate()?;
        self.financing.validate(self.purchase.total_cost())?;

        ensure_percentage("building_rate", self.depreciation.building_rate)?;
        ensure_percentage("furniture_rate", self.depreciation.furniture_rate)?;

        ensure_non_negative("annual_income", self.tax.annual_income)?;
        if self.tax.church_tax {
            ensure_percentage("church_tax_rate", self.tax.church_tax_rate)?;
        }

        ensure_growth_rate("appreciation_rate", self.projection.appreciation_rate)?;
        ensure_growth_rate("rent_increase_rate", self.projection.rent_increase_rate)?;
        match self.projection.period_years {
            0 => Err(InputError::ZeroHoldingPeriod),
            years if years > MAX_HOLDING_PERIOD_YEARS => {
                Err(InputError::HoldingPeriodTooLong(years))
            }
            _ => Ok(()),
        }
    }
}
