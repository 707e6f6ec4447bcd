use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// German federal state (Bundesland).
///
/// The state fixes the real-estate transfer tax rate and the church tax
/// surcharge on the income tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FederalState {
    BadenWuerttemberg,
    Bayern,
    Berlin,
    Brandenburg,
    Bremen,
    Hamburg,
    Hessen,
    MecklenburgVorpommern,
    Niedersachsen,
    NordrheinWestfalen,
    RheinlandPfalz,
    Saarland,
    Sachsen,
    SachsenAnhalt,
    SchleswigHolstein,
    Thueringen,
}

impl FederalState {
    pub const ALL: [FederalState; 16] = [
        Self::BadenWuerttemberg,
        Self::Bayern,
        Self::Berlin,
        Self::Brandenburg,
        Self::Bremen,
        Self::Hamburg,
        Self::Hessen,
        Self::MecklenburgVorpommern,
        Self::Niedersachsen,
        Self::NordrheinWestfalen,
        Self::RheinlandPfalz,
        Self::Saarland,
        Self::Sachsen,
        Self::SachsenAnhalt,
        Self::SchleswigHolstein,
        Self::Thueringen,
    ];

    /// ISO 3166-2:DE subdivision code without the country prefix.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadenWuerttemberg => "BW",
            Self::Bayern => "BY",
            Self::Berlin => "BE",
            Self::Brandenburg => "BB",
            Self::Bremen => "HB",
            Self::Hamburg => "HH",
            Self::Hessen => "HE",
            Self::MecklenburgVorpommern => "MV",
            Self::Niedersachsen => "NI",
            Self::NordrheinWestfalen => "NW",
            Self::RheinlandPfalz => "RP",
            Self::Saarland => "SL",
            Self::Sachsen => "SN",
            Self::SachsenAnhalt => "ST",
            Self::SchleswigHolstein => "SH",
            Self::Thueringen => "TH",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BadenWuerttemberg => "Baden-Württemberg",
            Self::Bayern => "Bayern",
            Self::Berlin => "Berlin",
            Self::Brandenburg => "Brandenburg",
            Self::Bremen => "Bremen",
            Self::Hamburg => "Hamburg",
            Self::Hessen => "Hessen",
            Self::MecklenburgVorpommern => "Mecklenburg-Vorpommern",
            Self::Niedersachsen => "Niedersachsen",
            Self::NordrheinWestfalen => "Nordrhein-Westfalen",
            Self::RheinlandPfalz => "Rheinland-Pfalz",
            Self::Saarland => "Saarland",
            Self::Sachsen => "Sachsen",
            Self::SachsenAnhalt => "Sachsen-Anhalt",
            Self::SchleswigHolstein => "Schleswig-Holstein",
            Self::Thueringen => "Thüringen",
        }
    }

    /// Parses a two-letter code (`"BY"`) or the state name (`"Bayern"`).
    /// Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        let lowered = needle.to_lowercase();
        Self::ALL.into_iter().find(|state| {
            state.code().eq_ignore_ascii_case(needle) || state.name().to_lowercase() == lowered
        })
    }

    /// Transfer tax (Grunderwerbsteuer) in percent of the purchase price, as of 2024.
    pub fn transfer_tax_rate(&self) -> Decimal {
        match self {
            Self::Bayern => dec!(3.5),
            Self::Hamburg | Self::Sachsen => dec!(5.5),
            Self::Berlin | Self::Hessen | Self::MecklenburgVorpommern => dec!(6.0),
            Self::Brandenburg
            | Self::NordrheinWestfalen
            | Self::Saarland
            | Self::SchleswigHolstein => dec!(6.5),
            Self::BadenWuerttemberg
            | Self::Bremen
            | Self::Niedersachsen
            | Self::RheinlandPfalz
            | Self::SachsenAnhalt
            | Self::Thueringen => dec!(5.0),
        }
    }

    /// Church tax in percent of the income tax: 8 % in Bavaria and
    /// Baden-Württemberg, 9 % everywhere else.
    pub fn church_tax_rate(&self) -> Decimal {
        match self {
            Self::Bayern | Self::BadenWuerttemberg => dec!(8),
            _ => dec!(9),
        }
    }
}
