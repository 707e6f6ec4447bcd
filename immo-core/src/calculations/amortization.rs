//! Constant-annuity loan (Annuitätendarlehen).
//!
//! The yearly payment is fixed at `amount * (interest_rate + amortization_rate)`.
//! Interest is charged on the outstanding balance, the rest of the payment
//! repays principal. In the last amortizing year the principal is capped at
//! the remaining balance, so the final payment is smaller than the annuity.
//! A repaid loan stays at zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use immo_core::calculations::AnnuityLoan;
//!
//! let loan = AnnuityLoan::new(dec!(300000), dec!(0.04), dec!(0.02));
//! let first = loan.schedule().next().unwrap();
//!
//! assert_eq!(loan.annuity(), dec!(18000));
//! assert_eq!(first.interest, dec!(12000));
//! assert_eq!(first.principal, dec!(6000));
//! assert_eq!(first.balance, dec!(294000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::max;

/// Interest and principal paid in one year and the balance afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationStep {
    pub interest: Decimal,
    pub principal: Decimal,
    pub payment: Decimal,
    pub balance: Decimal,
}

/// Advances a loan by one year.
///
/// `interest_rate` is a fraction (`0.035` for 3.5 %). A zero balance yields
/// an all-zero step.
pub fn amortization_step(
    balance: Decimal,
    interest_rate: Decimal,
    annuity: Decimal,
) -> AmortizationStep {
    if balance <= Decimal::ZERO {
        return AmortizationStep::default();
    }

    let interest = balance * interest_rate;
    let principal = max((annuity - interest).min(balance), Decimal::ZERO);

    AmortizationStep {
        interest,
        principal,
        payment: interest + principal,
        balance: max(balance - principal, Decimal::ZERO),
    }
}

/// Loan amount with its interest and initial amortization rate as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnuityLoan {
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub amortization_rate: Decimal,
}

impl AnnuityLoan {
    pub fn new(
        amount: Decimal,
        interest_rate: Decimal,
        amortization_rate: Decimal,
    ) -> Self {
        Self {
            amount,
            interest_rate,
            amortization_rate,
        }
    }

    /// Loan that is never drawn, used for cash purchases.
    pub fn none() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }

    pub fn annuity(&self) -> Decimal {
        self.amount * (self.interest_rate + self.amortization_rate)
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.annuity() / Decimal::from(12)
    }

    /// Yearly steps starting with year 1; the iterator never ends.
    pub fn schedule(&self) -> AmortizationSchedule {
        AmortizationSchedule {
            balance: self.amount,
            interest_rate: self.interest_rate,
            annuity: self.annuity(),
        }
    }
}

/// Iterator over the yearly [`AmortizationStep`]s of an [`AnnuityLoan`].
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    balance: Decimal,
    interest_rate: Decimal,
    annuity: Decimal,
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationStep;

    fn next(&mut self) -> Option<Self::Item> {
        let step = amortization_step(self.balance, self.interest_rate, self.annuity);
        self.balance = step.balance;
        Some(step)
    }
}
