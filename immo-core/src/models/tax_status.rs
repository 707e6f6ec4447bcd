use serde::{Deserialize, Serialize};

/// Filing status for the income-tax assessment.
///
/// `Married` applies income splitting (Splitting-Verfahren): the tax on half
/// of the joint income is computed with the basic schedule and doubled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxStatus {
    #[default]
    Single,
    Married,
}

impl TaxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
        }
    }

    /// Parses the English identifiers as well as the German form labels
    /// (`ledig`, `verheiratet`). Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "ledig" | "grundtabelle" => Some(Self::Single),
            "married" | "verheiratet" | "splittingtabelle" => Some(Self::Married),
            _ => None,
        }
    }

    pub fn is_splitting(&self) -> bool {
        matches!(self, Self::Married)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_english_and_german_labels() {
        assert_eq!(TaxStatus::parse("single"), Some(TaxStatus::Single));
        assert_eq!(TaxStatus::parse("Verheiratet"), Some(TaxStatus::Married));
        assert_eq!(TaxStatus::parse(" married "), Some(TaxStatus::Married));
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(TaxStatus::parse("divorced"), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in [TaxStatus::Single, TaxStatus::Married] {
            assert_eq!(TaxStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn only_married_uses_splitting() {
        assert!(TaxStatus::Married.is_splitting());
        assert!(!TaxStatus::Single.is_splitting());
    }
}
