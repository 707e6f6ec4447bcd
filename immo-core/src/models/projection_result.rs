use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{
    AllocationWarning, OngoingCostBaseline, ProjectionSummary, PurchaseCostBreakdown, TaxOverview,
};
use crate::models::YearRecord;

/// Non-fatal findings collected while projecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionWarning {
    Allocation(AllocationWarning),
    /// Prior income plus the property result was negative and was taxed as zero.
    IncomeClamped { year: u32, combined_income: Decimal },
}

impl fmt::Display for ProjectionWarning {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ProjectionWarning::Allocation(warning) => write!(f, "{}", warning),
            ProjectionWarning::IncomeClamped {
                year,
                combined_income,
            } => write!(
                f,
                "year {}: combined income {} is negative and was taxed as zero",
                year,
                combined_income.round_dp(2)
            ),
        }
    }
}

/// Parallel series for plotting the projection over time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub years: Vec<u32>,
    pub cashflows: Vec<Decimal>,
    pub property_values: Vec<Decimal>,
    pub equity_values: Vec<Decimal>,
    pub loan_balances: Vec<Decimal>,
}

/// Complete output of a projection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// One record per year of the holding period, in order.
    pub records: Vec<YearRecord>,
    pub summary: ProjectionSummary,
    pub purchase: PurchaseCostBreakdown,
    pub ongoing: OngoingCostBaseline,
    /// Taxes on the prior income, without the property.
    pub tax_overview: TaxOverview,
    pub warnings: Vec<ProjectionWarning>,
}

impl ProjectionResult {
    /// After-tax cashflow, property value, equity and loan balance per year.
    pub fn chart_series(&self) -> ChartSeries {
        let mut series = ChartSeries::default();
        for record in &self.records {
            series.years.push(record.year);
            series.cashflows.push(record.cashflow_after_tax);
            series.property_values.push(record.property_value);
            series.equity_values.push(record.equity);
            series.loan_balances.push(record.loan_balance);
        }
        series
    }

    pub fn period_years(&self) -> usize {
        self.records.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Sum of the after-tax cashflows over all years.
    pub fn cumulative_cashflow(&self) -> Decimal {
        self.records.iter().map(|r| r.cashflow_after_tax).sum()
    }

    /// Sum of the tax savings over all years.
    pub fn cumulative_tax_savings(&self) -> Decimal {
        self.records.iter().map(|r| r.tax_savings).sum()
    }

    /// Income-tax part of the cumulative tax savings.
    pub fn cumulative_income_tax_savings(&self) -> Decimal {
        self.records.iter().map(|r| r.income_tax_savings()).sum()
    }

    /// Church-tax part of the cumulative tax savings.
    pub fn cumulative_church_tax_savings(&self) -> Decimal {
        self.records.iter().map(|r| r.church_tax_savings()).sum()
    }

    /// First year that ends without outstanding loan, if any.
    pub fn loan_repaid_in_year(&self) -> Option<u32> {
        self.records
            .iter()
            .find(|r| r.is_loan_repaid())
            .map(|r| r.year)
    }

    /// Whether broker costs were deducted as consulting expense in year 1.
    pub fn has_first_year_deductible_costs(&self) -> bool {
        !self.purchase.first_year_deductible_costs.is_zero()
    }
}
