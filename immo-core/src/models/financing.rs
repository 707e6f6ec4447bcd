use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::from_percent;
use crate::models::InputError;
use crate::models::projection_input::{ensure_non_negative, ensure_percentage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingKind {
    Cash,
    #[default]
    Loan,
}

/// How the total acquisition cost is paid.
///
/// For [`FinancingKind::Loan`] the remainder after the down payment is
/// financed with a constant-annuity loan (Annuitätendarlehen): the yearly
/// payment `loan * (interest_rate + amortization_rate)` stays fixed while
/// the interest share shrinks with the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingTerms {
    #[serde(rename = "type", default)]
    pub kind: FinancingKind,
    pub down_payment: Decimal,
    /// Nominal interest in percent per year.
    pub interest_rate: Decimal,
    /// Initial amortization (Tilgung) in percent of the loan per year.
    pub amortization_rate: Decimal,
}

impl FinancingTerms {
    pub fn cash() -> Self {
        Self {
            kind: FinancingKind::Cash,
            down_payment: Decimal::ZERO,
            interest_rate: Decimal::ZERO,
            amortization_rate: Decimal::ZERO,
        }
    }

    pub fn is_loan(&self) -> bool {
        self.kind == FinancingKind::Loan
    }

    /// Financed amount for the given acquisition cost; zero for cash purchases.
    pub fn loan_amount(
        &self,
        total_cost: Decimal,
    ) -> Decimal {
        match self.kind {
            FinancingKind::Cash => Decimal::ZERO,
            FinancingKind::Loan => total_cost - self.down_payment,
        }
    }

    /// Capital brought in by the buyer: the down payment for loans, the full
    /// acquisition cost for cash purchases.
    pub fn initial_equity(
        &self,
        total_cost: Decimal,
    ) -> Decimal {
        match self.kind {
            FinancingKind::Cash => total_cost,
            FinancingKind::Loan => self.down_payment,
        }
    }

    /// Interest rate as a fraction (`3.5` → `0.035`).
    pub fn interest_fraction(&self) -> Decimal {
        from_percent(self.interest_rate)
    }

    pub fn amortization_fraction(&self) -> Decimal {
        from_percent(self.amortization_rate)
    }

    pub fn validate(
        &self,
        total_cost: Decimal,
    ) -> Result<(), InputError> {
        if !self.is_loan() {
            return Ok(());
        }
        ensure_non_negative("down_payment", self.down_payment)?;
        ensure_percentage("interest_rate", self.interest_rate)?;
        ensure_percentage("amortization_rate", self.amortization_rate)?;
        if self.down_payment > total_cost {
            return Err(InputError::DownPaymentExceedsTotalCost {
                down_payment: self.down_payment,
                total_cost,
            });
        }
        Ok(())
    }
}
