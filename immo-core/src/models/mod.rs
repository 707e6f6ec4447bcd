mod federal_state;
mod financing;
mod ongoing_costs;
pub(crate) mod projection_input;
mod projection_result;
mod purchase_cost;
mod tax_parameters;
mod tax_status;
mod year_record;

pub use federal_state::FederalState;
pub use financing::{FinancingKind, FinancingTerms};
pub use ongoing_costs::{OngoingCosts, OperatingCosts};
pub use projection_input::{
    DepreciationRates, InputError, MAX_AMOUNT, MAX_HOLDING_PERIOD_YEARS, ProjectionAssumptions,
    ProjectionInput, TaxProfile,
};
pub use projection_result::{ChartSeries, ProjectionResult, ProjectionWarning};
pub use purchase_cost::PurchaseCost;
pub use tax_parameters::{ProgressionZone, ProportionalZone, TaxParameters, TaxParametersError};
pub use tax_status::TaxStatus;
pub use year_record::YearRecord;
