//! Year-by-year projection of a buy-to-let investment.
//!
//! The projection is a fold over the holding period. [`ProjectionContext`]
//! holds everything that stays fixed for the whole run; [`YearState`] carries
//! what changes from one year to the next (escalated rent and costs, the loan
//! balance, accumulated depreciation). [`step_year`] turns one state into the
//! record for that year and the state for the following year.
//!
//! # Year 1 and escalation
//!
//! Year 1 uses the entered rent and cost lines. Every later year compounds the
//! previous year's values by `1 + rent_increase_rate`. Growth that no longer
//! fits a decimal stops the projection with [`ProjectionError::Overflow`].
//!
//! # Tax effect
//!
//! ```text
//! taxable_result   = cashflow_before_tax + principal
//!                  - building_depreciation - furniture_depreciation
//!                  - maintenance_deduction - first_year_deductible_costs
//! new_total_income = max(0, prior_income + taxable_result)
//! tax_savings      = (prior_tax - new_tax) + (prior_church_tax - new_church_tax)
//! ```
//!
//! Principal is added back because repayment is not deductible, only interest.

use rust_decimal::{Decimal, MathematicalOps};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::amortization::{AnnuityLoan, amortization_step};
use crate::calculations::church_tax::church_tax;
use crate::calculations::common::{from_percent, max};
use crate::calculations::income_tax::IncomeTaxSchedule;
use crate::calculations::ongoing::OngoingCostModel;
use crate::calculations::purchase::{PurchaseCostBreakdown, PurchaseCostModel};
use crate::calculations::summary::{SummaryAggregator, SummaryError};
use crate::models::{
    InputError, OperatingCosts, ProjectionInput, ProjectionResult, ProjectionWarning, TaxStatus,
    YearRecord,
};

/// Errors that stop a projection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// A compounded value no longer fits a decimal.
    #[error("projected values overflow in year {0}")]
    Overflow(u32),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Inputs that do not change during the projection.
#[derive(Debug, Clone)]
pub struct ProjectionContext {
    pub purchase_price: Decimal,
    /// `1 + appreciation_rate`.
    pub appreciation_factor: Decimal,
    /// `1 + rent_increase_rate`.
    pub escalation_factor: Decimal,
    pub vacancy_fraction: Decimal,

    pub loan: AnnuityLoan,

    pub building_basis: Decimal,
    pub furniture_basis: Decimal,
    pub building_depreciation: Decimal,
    pub furniture_depreciation: Decimal,
    pub annual_maintenance_deduction: Decimal,
    pub maintenance_distribution_years: u32,
    pub first_year_deductible_costs: Decimal,

    pub schedule: IncomeTaxSchedule,
    pub status: TaxStatus,
    pub prior_income: Decimal,
    pub prior_tax: Decimal,
    pub church_tax: bool,
    pub church_tax_rate: Decimal,
    pub prior_church_tax: Decimal,

    pub initial_equity: Decimal,
}

impl ProjectionContext {
    /// Derives the fixed parameters from validated input.
    pub fn new(input: &ProjectionInput) -> Self {
        let purchase = PurchaseCostModel::new(&input.purchase).calculate();
        Self::with_purchase(input, &purchase)
    }

    /// Like [`ProjectionContext::new`] with an already computed purchase breakdown.
    pub fn with_purchase(
        input: &ProjectionInput,
        purchase: &PurchaseCostBreakdown,
    ) -> Self {
        let total_cost = purchase.total_cost;
        let financing = &input.financing;

        let loan = if financing.is_loan() {
            AnnuityLoan::new(
                financing.loan_amount(total_cost),
                financing.interest_fraction(),
                financing.amortization_fraction(),
            )
        } else {
            AnnuityLoan::none()
        };

        let schedule = IncomeTaxSchedule::german_2024();
        let tax = &input.tax;
        let prior_tax = schedule.tax(tax.annual_income, tax.status);

        Self {
            purchase_price: purchase.purchase_price,
            appreciation_factor: Decimal::ONE + from_percent(input.projection.appreciation_rate),
            escalation_factor: Decimal::ONE + from_percent(input.projection.rent_increase_rate),
            vacancy_fraction: from_percent(input.ongoing.vacancy_rate),
            loan,
            building_basis: purchase.building_value,
            furniture_basis: purchase.furniture_value,
            building_depreciation: purchase.building_value
                * from_percent(input.depreciation.building_rate),
            furniture_depreciation: purchase.furniture_value
                * from_percent(input.depreciation.furniture_rate),
            annual_maintenance_deduction: purchase.annual_maintenance_deduction,
            maintenance_distribution_years: input.purchase.maintenance_distribution_years,
            first_year_deductible_costs: purchase.first_year_deductible_costs,
            schedule,
            status: tax.status,
            prior_income: tax.annual_income,
            prior_tax,
            church_tax: tax.church_tax,
            church_tax_rate: tax.church_tax_rate,
            prior_church_tax: church_tax(prior_tax, tax.church_tax, tax.church_tax_rate),
            initial_equity: financing.initial_equity(total_cost),
        }
    }
}

/// Values carried from one projected year into the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearState {
    /// Gross rent of the last projected year; the entered rent before year 1.
    pub gross_rent: Decimal,
    pub operating_costs: OperatingCosts,
    /// Loan balance at the start of the year.
    pub loan_balance: Decimal,
    pub building_depreciated: Decimal,
    pub furniture_depreciated: Decimal,
}

impl YearState {
    /// State before year 1.
    pub fn initial(input: &ProjectionInput) -> Self {
        let baseline = OngoingCostModel::new(&input.ongoing).calculate();

        Self {
            gross_rent: baseline.annual_rent,
            operating_costs: baseline.operating_costs,
            loan_balance: input.financing.loan_amount(input.purchase.total_cost()),
            building_depreciated: Decimal::ZERO,
            furniture_depreciated: Decimal::ZERO,
        }
    }
}

/// Projects one year.
///
/// Returns the state for `year + 1` and the finished record for `year`.
/// `year` is 1-based. From year 2 on, rent and cost lines of `state` are
/// escalated before use.
///
/// # Errors
///
/// Returns [`ProjectionError::Overflow`] if the escalated rent, a cost line
/// or the compounded property value does not fit a decimal.
pub fn step_year(
    state: &YearState,
    year: u32,
    ctx: &ProjectionContext,
) -> Result<(YearState, YearRecord), ProjectionError> {
    // Income and operating costs
    let overflow = || ProjectionError::Overflow(year);
    let (gross_rent, operating_costs) = if year > 1 {
        (
            state
                .gross_rent
                .checked_mul(ctx.escalation_factor)
                .ok_or_else(overflow)?,
            state
                .operating_costs
                .checked_escalate(ctx.escalation_factor)
                .ok_or_else(overflow)?,
        )
    } else {
        (state.gross_rent, state.operating_costs)
    };
    let vacancy_loss = gross_rent * ctx.vacancy_fraction;
    let rent = gross_rent - vacancy_loss;
    let ongoing_costs = operating_costs.total();
    let cashflow_before_financing = rent - ongoing_costs;

    // Financing
    let step = amortization_step(state.loan_balance, ctx.loan.interest_rate, ctx.loan.annuity());
    let cashflow_before_tax = cashflow_before_financing - step.payment;

    // Deductions
    let building_depreciation = capped_depreciation(
        ctx.building_depreciation,
        ctx.building_basis - state.building_depreciated,
    );
    let furniture_depreciation = capped_depreciation(
        ctx.furniture_depreciation,
        ctx.furniture_basis - state.furniture_depreciated,
    );
    let maintenance_deduction = if year <= ctx.maintenance_distribution_years {
        ctx.annual_maintenance_deduction
    } else {
        Decimal::ZERO
    };
    let first_year_deductible_costs = if year == 1 {
        ctx.first_year_deductible_costs
    } else {
        Decimal::ZERO
    };
    let total_depreciation = building_depreciation
        + furniture_depreciation
        + maintenance_deduction
        + first_year_deductible_costs;

    // Tax
    let taxable_result = cashflow_before_tax + step.principal - total_depreciation;
    let combined_income = ctx.prior_income + taxable_result;
    if combined_income < Decimal::ZERO {
        warn!(year, combined_income = %combined_income, "combined income below zero, taxed as zero");
    }
    let new_total_income = max(combined_income, Decimal::ZERO);
    let new_tax = ctx.schedule.tax(new_total_income, ctx.status);
    let new_church_tax = church_tax(new_tax, ctx.church_tax, ctx.church_tax_rate);
    let tax_savings = (ctx.prior_tax - new_tax) + (ctx.prior_church_tax - new_church_tax);
    let cashflow_after_tax = cashflow_before_tax + tax_savings;

    // Assets
    let property_value = ctx
        .appreciation_factor
        .checked_powi(i64::from(year - 1))
        .and_then(|growth| ctx.purchase_price.checked_mul(growth))
        .ok_or_else(overflow)?;
    let equity = property_value - step.balance;
    let equity_return = if ctx.initial_equity > Decimal::ZERO {
        Some(cashflow_after_tax / ctx.initial_equity * Decimal::ONE_HUNDRED)
    } else {
        None
    };

    debug!(
        year,
        cashflow_before_tax = %cashflow_before_tax,
        taxable_result = %taxable_result,
        new_tax = %new_tax,
        loan_balance = %step.balance,
        "projected year"
    );

    let record = YearRecord {
        year,
        gross_rent,
        vacancy_loss,
        rent,
        operating_costs,
        ongoing_costs,
        cashflow_before_financing,
        interest: step.interest,
        principal: step.principal,
        financing_payment: step.payment,
        loan_balance: step.balance,
        cashflow_before_tax,
        building_depreciation,
        furniture_depreciation,
        maintenance_deduction,
        first_year_deductible_costs,
        total_depreciation,
        taxable_result,
        prior_income: ctx.prior_income,
        prior_tax: ctx.prior_tax,
        new_total_income,
        new_tax,
        prior_church_tax: ctx.prior_church_tax,
        new_church_tax,
        tax_savings,
        cashflow_after_tax,
        property_value,
        equity,
        initial_equity: ctx.initial_equity,
        equity_return,
    };

    let next = YearState {
        gross_rent,
        operating_costs,
        loan_balance: step.balance,
        building_depreciated: state.building_depreciated + building_depreciation,
        furniture_depreciated: state.furniture_depreciated + furniture_depreciation,
    };

    Ok((next, record))
}

fn capped_depreciation(
    annual: Decimal,
    remaining: Decimal,
) -> Decimal {
    max(annual.min(remaining), Decimal::ZERO)
}

/// Validates the input and projects every year of the holding period.
///
/// Calling this twice with the same input yields identical results.
///
/// # Errors
///
/// Returns [`ProjectionError::Input`] for invalid input. An allocation
/// mismatch is not an error; it is reported in
/// [`ProjectionResult::warnings`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use immo_core::*;
/// use immo_core::calculations::project;
///
/// let input = ProjectionInput {
///     purchase: PurchaseCost {
///         purchase_price: dec!(200000),
///         transfer_tax_rate: dec!(6.5),
///         notary_rate: dec!(2),
///         broker_rate: dec!(0),
///         land_value: dec!(50000),
///         building_value: dec!(150000),
///         furniture_value: dec!(0),
///         maintenance_cost: dec!(0),
///         maintenance_distribution_years: 1,
///         broker_as_consulting: false,
///     },
///     ongoing: OngoingCosts {
///         monthly_rent: dec!(800),
///         vacancy_rate: dec!(0),
///         property_tax: dec!(300),
///         management_fee: dec!(250),
///         maintenance_reserve_per_area: dec!(0),
///         property_size: dec!(60),
///         insurance: dec!(120),
///     },
///     financing: FinancingTerms::cash(),
///     depreciation: DepreciationRates {
///         building_rate: dec!(2),
///         furniture_rate: dec!(0),
///     },
///     tax: TaxProfile {
///         annual_income: dec!(45000),
///         status: TaxStatus::Single,
///         church_tax: false,
///         church_tax_rate: dec!(9),
///     },
///     projection: ProjectionAssumptions {
///         appreciation_rate: dec!(0),
///         rent_increase_rate: dec!(0),
///         period_years: 3,
///     },
/// };
///
/// let result = project(&input).unwrap();
///
/// assert_eq!(result.records.len(), 3);
/// assert_eq!(result.summary.initial_equity, dec!(217000));
/// assert!(result.records.iter().all(|r| r.loan_balance.is_zero()));
/// ```
pub fn project(input: &ProjectionInput) -> Result<ProjectionResult, ProjectionError> {
    input.validate()?;

    let purchase = PurchaseCostModel::new(&input.purchase).calculate();
    let ctx = ProjectionContext::with_purchase(input, &purchase);
    let ongoing = OngoingCostModel::new(&input.ongoing).calculate();
    let tax_overview = ctx.schedule.overview(&input.tax);

    let mut warnings = Vec::new();
    if let Some(allocation) = purchase.allocation_warning.clone() {
        warnings.push(ProjectionWarning::Allocation(allocation));
    }

    let mut state = YearState::initial(input);
    let mut records = Vec::with_capacity(input.projection.period_years as usize);
    for year in 1..=input.projection.period_years {
        let (next, record) = step_year(&state, year, &ctx)?;
        let combined_income = record.prior_income + record.taxable_result;
        if combined_income < Decimal::ZERO {
            warnings.push(ProjectionWarning::IncomeClamped {
                year,
                combined_income,
            });
        }
        records.push(record);
        state = next;
    }

    let summary = SummaryAggregator::new(purchase.total_cost, ctx.initial_equity, &ctx.loan)
        .calculate(&records)?;

    Ok(ProjectionResult {
        records,
        summary,
        purchase,
        ongoing,
        tax_overview,
        warnings,
    })
}
