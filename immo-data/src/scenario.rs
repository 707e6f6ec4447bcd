use std::fs;
use std::path::{Path, PathBuf};

use immo_core::{
    DepreciationRates, FederalState, FinancingKind, FinancingTerms, InputError, OngoingCosts,
    ProjectionAssumptions, ProjectionInput, PurchaseCost, TaxProfile, TaxStatus,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;

/// Church tax rate used when neither a rate nor a federal state is given.
const DEFAULT_CHURCH_TAX_RATE: Decimal = dec!(9);

/// Errors that can occur when loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown federal state '{0}'")]
    UnknownFederalState(String),

    #[error("unknown tax status '{0}' (expected single or married)")]
    UnknownTaxStatus(String),

    #[error("purchase.transfer_tax_rate is required when no federal_state is given")]
    MissingTransferTaxRate,

    #[error("invalid scenario: {0}")]
    Invalid(#[from] InputError),
}

/// A validated scenario ready for projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: Option<String>,
    pub federal_state: Option<FederalState>,
    pub input: ProjectionInput,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    name: Option<String>,
    purchase: PurchaseSection,
    ongoing: OngoingCosts,
    #[serde(default)]
    financing: FinancingSection,
    depreciation: DepreciationRates,
    tax: TaxSection,
    #[serde(default)]
    projection: ProjectionSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PurchaseSection {
    federal_state: Option<String>,
    purchase_price: Decimal,
    transfer_tax_rate: Option<Decimal>,
    notary_rate: Decimal,
    broker_rate: Decimal,
    #[serde(default)]
    broker_as_consulting: bool,
    land_value: Decimal,
    building_value: Decimal,
    #[serde(default)]
    furniture_value: Decimal,
    #[serde(default)]
    maintenance_cost: Decimal,
    #[serde(default = "default_distribution_years")]
    maintenance_distribution_years: u32,
}

fn default_distribution_years() -> u32 {
    1
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FinancingSection {
    #[serde(rename = "type", default)]
    kind: FinancingKind,
    #[serde(default)]
    down_payment: Decimal,
    #[serde(default)]
    interest_rate: Decimal,
    #[serde(default)]
    amortization_rate: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxSection {
    annual_income: Decimal,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    church_tax: bool,
    church_tax_rate: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectionSection {
    #[serde(default)]
    appreciation_rate: Decimal,
    #[serde(default)]
    rent_increase_rate: Decimal,
    #[serde(default = "default_period_years")]
    period_years: u32,
}

fn default_period_years() -> u32 {
    10
}

impl Default for ProjectionSection {
    fn default() -> Self {
        Self {
            appreciation_rate: Decimal::ZERO,
            rent_increase_rate: Decimal::ZERO,
            period_years: default_period_years(),
        }
    }
}

/// Loader for TOML scenario files.
///
/// A scenario has the sections `[purchase]`, `[ongoing]`, `[financing]`,
/// `[depreciation]`, `[tax]` and `[projection]`. Rates are whole-number
/// percentages. When `purchase.federal_state` is set, the transfer tax and
/// church tax rates default to that state's rates.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse and validate a scenario from TOML text.
    pub fn parse(content: &str) -> Result<Scenario, ScenarioError> {
        let file: ScenarioFile = toml::from_str(content)?;
        let scenario = Self::resolve(file)?;
        scenario.input.validate()?;
        Ok(scenario)
    }

    /// Read, parse and validate a scenario file.
    pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    fn resolve(file: ScenarioFile) -> Result<Scenario, ScenarioError> {
        let federal_state = file
            .purchase
            .federal_state
            .as_deref()
            .map(|s| {
                FederalState::parse(s)
                    .ok_or_else(|| ScenarioError::UnknownFederalState(s.to_string()))
            })
            .transpose()?;

        let transfer_tax_rate = file
            .purchase
            .transfer_tax_rate
            .or_else(|| federal_state.map(|state| state.transfer_tax_rate()))
            .ok_or(ScenarioError::MissingTransferTaxRate)?;

        let status = match file.tax.status.as_deref() {
            Some(s) => TaxStatus::parse(s)
                .ok_or_else(|| ScenarioError::UnknownTaxStatus(s.to_string()))?,
            None => TaxStatus::default(),
        };

        let church_tax_rate = file
            .tax
            .church_tax_rate
            .or_else(|| federal_state.map(|state| state.church_tax_rate()))
            .unwrap_or(DEFAULT_CHURCH_TAX_RATE);

        let p = file.purchase;
        let input = ProjectionInput {
            purchase: PurchaseCost {
                purchase_price: p.purchase_price,
                transfer_tax_rate,
                notary_rate: p.notary_rate,
                broker_rate: p.broker_rate,
                land_value: p.land_value,
                building_value: p.building_value,
                furniture_value: p.furniture_value,
                maintenance_cost: p.maintenance_cost,
                maintenance_distribution_years: p.maintenance_distribution_years,
                broker_as_consulting: p.broker_as_consulting,
            },
            ongoing: file.ongoing,
            financing: FinancingTerms {
                kind: file.financing.kind,
                down_payment: file.financing.down_payment,
                interest_rate: file.financing.interest_rate,
                amortization_rate: file.financing.amortization_rate,
            },
            depreciation: file.depreciation,
            tax: TaxProfile {
                annual_income: file.tax.annual_income,
                status,
                church_tax: file.tax.church_tax,
                church_tax_rate,
            },
            projection: ProjectionAssumptions {
                appreciation_rate: file.projection.appreciation_rate,
                rent_increase_rate: file.projection.rent_increase_rate,
                period_years: file.projection.period_years,
            },
        };

        Ok(Scenario {
            name: file.name,
            federal_state,
            input,
        })
    }
}
