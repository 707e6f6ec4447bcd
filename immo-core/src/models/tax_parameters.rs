use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a tax parameter table is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxParametersError {
    /// The basic allowance must be non-negative.
    #[error("basic allowance must be non-negative, got {0}")]
    NegativeAllowance(Decimal),

    /// Zone boundaries must be strictly increasing.
    #[error("zone boundaries must be strictly increasing: {lower} >= {upper}")]
    UnorderedZones { lower: Decimal, upper: Decimal },
}

/// Progression zone whose tax is `(quadratic * y + linear) * y + constant`,
/// with `y = (income - floor) / 10000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionZone {
    pub quadratic: Decimal,
    pub linear: Decimal,
    pub constant: Decimal,
}

/// Proportional zone whose tax is `rate * income - deduction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionalZone {
    pub rate: Decimal,
    pub deduction: Decimal,
}

/// Income-tax schedule (§ 32a EStG) for one assessment year.
///
/// | Zone | Taxable income            | Formula                              |
/// |------|---------------------------|--------------------------------------|
/// | 0    | up to `allowance`         | 0                                    |
/// | 1    | up to `zone1_end`         | `(a1 * y + b1) * y`                  |
/// | 2    | up to `zone2_end`         | `(a2 * z + b2) * z + c2`             |
/// | 3    | up to `zone3_end`         | `0.42 * x - d3`                      |
/// | 4    | above `zone3_end`         | `0.45 * x - d4`                      |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxParameters {
    pub tax_year: i32,
    pub allowance: Decimal,
    pub zone1_end: Decimal,
    pub zone2_end: Decimal,
    pub zone3_end: Decimal,
    pub zone1: ProgressionZone,
    pub zone2: ProgressionZone,
    pub zone3: ProportionalZone,
    pub zone4: ProportionalZone,
}

impl TaxParameters {
    /// The 2024 schedule: basic allowance 12,096 EUR, top rate 45 % above 277,825 EUR.
    pub fn german_2024() -> Self {
        Self {
            tax_year: 2024,
            allowance: dec!(12096),
            zone1_end: dec!(17443),
            zone2_end: dec!(68480),
            zone3_end: dec!(277825),
            zone1: ProgressionZone {
                quadratic: dec!(932.3),
                linear: dec!(1400),
                constant: Decimal::ZERO,
            },
            zone2: ProgressionZone {
                quadratic: dec!(176.64),
                linear: dec!(2397),
                constant: dec!(1015.13),
            },
            zone3: ProportionalZone {
                rate: dec!(0.42),
                deduction: dec!(10911.92),
            },
            zone4: ProportionalZone {
                rate: dec!(0.45),
                deduction: dec!(19246.67),
            },
        }
    }

    /// Zone boundaries in ascending order, starting with the allowance.
    pub fn boundaries(&self) -> [Decimal; 4] {
        [self.allowance, self.zone1_end, self.zone2_end, self.zone3_end]
    }

    /// Checks that the allowance is non-negative and the zone boundaries
    /// are strictly increasing.
    pub fn validate(&self) -> Result<(), TaxParametersError> {
        if self.allowance < Decimal::ZERO {
            return Err(TaxParametersError::NegativeAllowance(self.allowance));
        }
        for pair in self.boundaries().windows(2) {
            if pair[0] >= pair[1] {
                return Err(TaxParametersError::UnorderedZones {
                    lower: pair[0],
                    upper: pair[1],
                });
            }
        }
        Ok(())
    }
}

impl Default for TaxParameters {
    fn default() -> Self {
        Self::german_2024()
    }
}
