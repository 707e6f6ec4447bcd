//! German income tax (Einkommensteuer) according to § 32a EStG.
//!
//! The schedule is split into five zones. Zones 1 and 2 are quadratic in a
//! normalised variable `(income - zone_floor) / 10000`; zones 3 and 4 are
//! linear. The coefficients make the tariff continuous at every boundary.
//!
//! Married couples are assessed with income splitting: the tax on half of
//! the joint income is rounded to whole euros and doubled.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use immo_core::TaxStatus;
//! use immo_core::calculations::IncomeTaxSchedule;
//!
//! let schedule = IncomeTaxSchedule::german_2024();
//!
//! assert_eq!(schedule.tax(dec!(12096), TaxStatus::Single), dec!(0));
//! assert_eq!(schedule.tax(dec!(60000), TaxStatus::Single), dec!(14415));
//! assert_eq!(schedule.tax(dec!(100000), TaxStatus::Married), dec!(21382));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::church_tax::church_tax;
use crate::calculations::common::round_to_whole;
use crate::models::{TaxParameters, TaxParametersError, TaxProfile, TaxStatus};

const ZONE_SCALE: Decimal = dec!(10000);

/// Income tax and church tax on the investor's income without the property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxOverview {
    pub annual_income: Decimal,
    pub status: TaxStatus,
    pub income_tax: Decimal,
    pub church_tax: Decimal,
    /// Income tax in percent of the income; `None` for zero income.
    pub effective_rate: Option<Decimal>,
    /// Tax on the next euro of income, in percent.
    pub marginal_rate: Decimal,
}

impl TaxOverview {
    pub fn total_tax(&self) -> Decimal {
        self.income_tax + self.church_tax
    }
}

/// Calculator for the progressive income-tax tariff.
#[derive(Debug, Clone)]
pub struct IncomeTaxSchedule {
    params: TaxParameters,
}

impl IncomeTaxSchedule {
    /// Creates a schedule from a parameter table after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`TaxParametersError`] if the allowance is negative or the
    /// zone boundaries are not strictly increasing.
    pub fn new(params: TaxParameters) -> Result<Self, TaxParametersError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The 2024 tariff.
    pub fn german_2024() -> Self {
        Self {
            params: TaxParameters::german_2024(),
        }
    }

    pub fn params(&self) -> &TaxParameters {
        &self.params
    }

    /// Income tax in whole euros for the given taxable income.
    ///
    /// Incomes at or below the basic allowance, including negative incomes,
    /// are tax free. The result is non-decreasing in `income`.
    pub fn tax(
        &self,
        income: Decimal,
        status: TaxStatus,
    ) -> Decimal {
        match status {
            TaxStatus::Single => round_to_whole(self.basic_tariff(income)),
            TaxStatus::Married => {
                let half = income / Decimal::TWO;
                round_to_whole(self.basic_tariff(half)) * Decimal::TWO
            }
        }
    }

    /// Unrounded tax of the basic tariff (Grundtarif) for one person.
    pub fn basic_tariff(
        &self,
        income: Decimal,
    ) -> Decimal {
        let p = &self.params;

        if income <= p.allowance {
            return Decimal::ZERO;
        }
        if income <= p.zone1_end {
            let y = (income - p.allowance) / ZONE_SCALE;
            return (p.zone1.quadratic * y + p.zone1.linear) * y + p.zone1.constant;
        }
        if income <= p.zone2_end {
            let z = (income - p.zone1_end) / ZONE_SCALE;
            return (p.zone2.quadratic * z + p.zone2.linear) * z + p.zone2.constant;
        }
        if income <= p.zone3_end {
            return p.zone3.rate * income - p.zone3.deduction;
        }
        p.zone4.rate * income - p.zone4.deduction
    }

    /// Income tax, church tax, effective and marginal rate on the prior income.
    ///
    /// Under splitting the marginal rate is the one at half the joint income.
    pub fn overview(
        &self,
        profile: &TaxProfile,
    ) -> TaxOverview {
        let income_tax = self.tax(profile.annual_income, profile.status);
        let church_tax = church_tax(income_tax, profile.church_tax, profile.church_tax_rate);
        let effective_rate = if profile.annual_income > Decimal::ZERO {
            Some(income_tax / profile.annual_income * Decimal::ONE_HUNDRED)
        } else {
            None
        };

        let assessed_income = if profile.status.is_splitting() {
            profile.annual_income / Decimal::TWO
        } else {
            profile.annual_income
        };

        TaxOverview {
            annual_income: profile.annual_income,
            status: profile.status,
            income_tax,
            church_tax,
            effective_rate,
            marginal_rate: self.marginal_rate(assessed_income),
        }
    }

    /// Marginal rate in percent at `income`, from the two-euro difference quotient.
    pub fn marginal_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        let step = Decimal::ONE;
        let delta = self.basic_tariff(income + step) - self.basic_tariff(income - step);
        delta / (step + step) * Decimal::ONE_HUNDRED
    }
}

impl Default for IncomeTaxSchedule {
    fn default() -> Self {
        Self::german_2024()
    }
}

/// Income tax with the 2024 tariff.
pub fn income_tax(
    income: Decimal,
    status: TaxStatus,
) -> Decimal {
    IncomeTaxSchedule::german_2024().tax(income, status)
}

/// Average tax rate as a fraction of income, or `None` for non-positive income.
pub fn average_rate(
    income: Decimal,
    status: TaxStatus,
) -> Option<Decimal> {
    if income <= Decimal::ZERO {
        return None;
    }
    Some(income_tax(income, status) / income)
}
