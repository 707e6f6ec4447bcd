use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::InputError;
use crate::models::projection_input::ensure_non_negative;

/// Rental income and running costs as entered for the first year.
///
/// All cost lines are annual amounts except `maintenance_reserve_per_area`,
/// which is per square metre and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngoingCosts {
    pub monthly_rent: Decimal,
    /// Vacancy (Leerstand) in percent of the gross rent.
    pub vacancy_rate: Decimal,
    pub property_tax: Decimal,
    pub management_fee: Decimal,
    pub maintenance_reserve_per_area: Decimal,
    pub property_size: Decimal,
    pub insurance: Decimal,
}

impl OngoingCosts {
    pub fn operating_costs(&self) -> OperatingCosts {
        OperatingCosts {
            property_tax: self.property_tax,
            management_fee: self.management_fee,
            maintenance_reserve: self.maintenance_reserve_per_area * self.property_size,
            insurance: self.insurance,
        }
    }

    pub fn validate(&self) -> Result<(), InputError> {
        ensure_non_negative("monthly_rent", self.monthly_rent)?;
        if self.vacancy_rate < Decimal::ZERO || self.vacancy_rate >= Decimal::ONE_HUNDRED {
            return Err(InputError::InvalidVacancyRate(self.vacancy_rate));
        }
        ensure_non_negative("property_tax", self.property_tax)?;
        ensure_non_negative("management_fee", self.management_fee)?;
        ensure_non_negative("maintenance_reserve_per_area", self.maintenance_reserve_per_area)?;
        ensure_non_negative("property_size", self.property_size)?;
        ensure_non_negative("insurance", self.insurance)?;
        Ok(())
    }
}

/// The four annual operating cost lines (Bewirtschaftungskosten).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingCosts {
    pub property_tax: Decimal,
    pub management_fee: Decimal,
    pub maintenance_reserve: Decimal,
    pub insurance: Decimal,
}

impl OperatingCosts {
    pub fn total(&self) -> Decimal {
        self.property_tax + self.management_fee + self.maintenance_reserve + self.insurance
    }

    /// Scales every line by `factor`, e.g. `1.02` for a 2 % increase.
    /// `None` if a line overflows.
    pub fn checked_escalate(
        &self,
        factor: Decimal,
    ) -> Option<Self> {
        Some(Self {
            property_tax: self.property_tax.checked_mul(factor)?,
            management_fee: self.management_fee.checked_mul(factor)?,
            maintenance_reserve: self.maintenance_reserve.checked_mul(factor)?,
            insurance: self.insurance.checked_mul(factor)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn ongoing() -> OngoingCosts {
        OngoingCosts {
            monthly_rent: dec!(1200),
            vacancy_rate: dec!(3),
            property_tax: dec!(400),
            management_fee: dec!(300),
            maintenance_reserve_per_area: dec!(5),
            property_size: dec!(70),
            insurance: dec!(150),
        }
    }

    #[test]
    fn maintenance_reserve_scales_with_area() {
        let costs = ongoing().operating_costs();

        assert_eq!(costs.maintenance_reserve, dec!(350));
        assert_eq!(costs.total(), dec!(1200));
    }

    #[test]
    fn escalate_scales_every_line() {
        let costs = ongoing().operating_costs().checked_escalate(dec!(1.02)).unwrap();

        assert_eq!(costs.property_tax, dec!(408));
        assert_eq!(costs.management_fee, dec!(306));
        assert_eq!(costs.maintenance_reserve, dec!(357));
        assert_eq!(costs.insurance, dec!(153));
        assert_eq!(costs.total(), dec!(1224));
    }

    #[test]
    fn escalate_reports_overflow() {
        let costs = OperatingCosts {
            property_tax: Decimal::MAX,
            ..ongoing().operating_costs()
        };

        assert_eq!(costs.checked_escalate(dec!(1.02)), None);
    }

    #[test]
    fn validate_rejects_full_vacancy() {
        let mut o = ongoing();
        o.vacancy_rate = dec!(100);

        assert_eq!(o.validate(), Err(InputError::InvalidVacancyRate(dec!(100))));
    }

    #[test]
    fn validate_rejects_negative_rent() {
        let mut o = ongoing();
        o.monthly_rent = dec!(-5);

        assert_eq!(
            o.validate(),
            Err(InputError::NegativeAmount {
                field: "monthly_rent",
                value: dec!(-5),
            })
        );
    }
}
