//! Calculations behind the investment projection.
//!
//! Each module covers one area: the income-tax tariff, church tax, purchase
//! costs, the rental baseline, the annuity loan, the yearly projection and
//! the summary over the holding period.

pub mod amortization;
pub mod church_tax;
pub mod common;
pub mod income_tax;
pub mod ongoing;
pub mod projection;
pub mod purchase;
pub mod summary;

pub use amortization::{AmortizationSchedule, AmortizationStep, AnnuityLoan, amortization_step};
pub use church_tax::church_tax;
pub use income_tax::{IncomeTaxSchedule, TaxOverview, average_rate, income_tax};
pub use ongoing::{OngoingCostBaseline, OngoingCostModel};
pub use projection::{ProjectionContext, ProjectionError, YearState, project, step_year};
pub use purchase::{AllocationWarning, PurchaseCostBreakdown, PurchaseCostModel};
pub use summary::{ProjectionSummary, SummaryAggregator, SummaryError, annualized_roi};
