use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::OperatingCosts;

/// One projected holding year.
///
/// Records are produced in order by the projection engine and never change
/// afterwards. Expenses are positive amounts; `taxable_result`, the
/// cashflows and `tax_savings` are signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    /// 1-based year of ownership.
    pub year: u32,

    // Income
    pub gross_rent: Decimal,
    pub vacancy_loss: Decimal,
    /// Effective rent after vacancy.
    pub rent: Decimal,

    // Operating costs
    pub operating_costs: OperatingCosts,
    pub ongoing_costs: Decimal,
    pub cashflow_before_financing: Decimal,

    // Financing
    pub interest: Decimal,
    pub principal: Decimal,
    pub financing_payment: Decimal,
    /// Outstanding loan at the end of the year.
    pub loan_balance: Decimal,
    pub cashflow_before_tax: Decimal,

    // Deductions
    pub building_depreciation: Decimal,
    pub furniture_depreciation: Decimal,
    pub maintenance_deduction: Decimal,
    /// Broker fee deducted as consulting expense; non-zero in year 1 only.
    pub first_year_deductible_costs: Decimal,
    pub total_depreciation: Decimal,

    // Tax
    /// Property result added to the investor's income (negative = loss).
    pub taxable_result: Decimal,
    pub prior_income: Decimal,
    pub prior_tax: Decimal,
    pub new_total_income: Decimal,
    pub new_tax: Decimal,
    pub prior_church_tax: Decimal,
    pub new_church_tax: Decimal,
    /// Income and church tax saved by owning the property (negative = extra tax).
    pub tax_savings: Decimal,
    pub cashflow_after_tax: Decimal,

    // Assets
    pub property_value: Decimal,
    pub equity: Decimal,
    pub initial_equity: Decimal,
    /// After-tax cashflow in percent of the initial equity; `None` without equity.
    pub equity_return: Option<Decimal>,
}

impl YearRecord {
    pub fn monthly_cashflow_after_tax(&self) -> Decimal {
        self.cashflow_after_tax / Decimal::from(12)
    }

    pub fn income_tax_savings(&self) -> Decimal {
        self.prior_tax - self.new_tax
    }

    pub fn church_tax_savings(&self) -> Decimal {
        self.prior_church_tax - self.new_church_tax
    }

    pub fn is_loan_repaid(&self) -> bool {
        self.loan_balance.is_zero()
    }
}
