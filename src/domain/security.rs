//! Security catalog: the fixed universe of tradable symbols.
//!
//! Lookup is total. An unknown symbol resolves to a fallback descriptor priced
//! at [`DEFAULT_BASE_PRICE`] so the candle generator accepts any input string.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BASE_PRICE: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sector {
    Energy,
    It,
    Banking,
    Fmcg,
    Telecom,
    Infrastructure,
    Nbfc,
    Consumer,
    Auto,
    Pharma,
    Power,
    /// Assigned only to fallback descriptors; not part of [`Sector::ALL`].
    Unclassified,
}

impl Sector {
    /// The fixed sector set, in heatmap order.
    pub const ALL: [Sector; 11] = [
        Sector::Energy,
        Sector::It,
        Sector::Banking,
        Sector::Fmcg,
        Sector::Telecom,
        Sector::Infrastructure,
        Sector::Nbfc,
        Sector::Consumer,
        Sector::Auto,
        Sector::Pharma,
        Sector::Power,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Energy => "Energy",
            Sector::It => "IT",
            Sector::Banking => "Banking",
            Sector::Fmcg => "FMCG",
            Sector::Telecom => "Telecom",
            Sector::Infrastructure => "Infrastructure",
            Sector::Nbfc => "NBFC",
            Sector::Consumer => "Consumer",
            Sector::Auto => "Auto",
            Sector::Pharma => "Pharma",
            Sector::Power => "Power",
            Sector::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sector: {0}")]
pub struct UnknownSector(pub String);

impl FromStr for Sector {
    type Err = UnknownSector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Sector::ALL
            .iter()
            .copied()
            .find(|sector| sector.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSector(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Security {
    pub symbol: String,
    pub name: String,
    pub sector: Sector,
    pub base_price: f64,
}

impl Security {
    pub fn new(symbol: &str, name: &str, sector: Sector, base_price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector,
            base_price,
        }
    }

    /// Descriptor used when a symbol is not in the catalog.
    pub fn fallback(symbol: &str) -> Self {
        Self::new(symbol, symbol, Sector::Unclassified, DEFAULT_BASE_PRICE)
    }
}

const LARGE_CAP_UNIVERSE: [(&str, &str, Sector, f64); 20] = [
    ("RELIANCE", "Reliance Industries", Sector::Energy, 2850.0),
    ("TCS", "Tata Consultancy", Sector::It, 3920.0),
    ("HDFCBANK", "HDFC Bank", Sector::Banking, 1680.0),
    ("INFY", "Infosys", Sector::It, 1540.0),
    ("ICICIBANK", "ICICI Bank", Sector::Banking, 1020.0),
    ("HINDUNILVR", "Hindustan Unilever", Sector::Fmcg, 2480.0),
    ("SBIN", "State Bank of India", Sector::Banking, 780.0),
    ("BHARTIARTL", "Bharti Airtel", Sector::Telecom, 1320.0),
    ("KOTAKBANK", "Kotak Mahindra Bank", Sector::Banking, 1760.0),
    ("LT", "Larsen & Toubro", Sector::Infrastructure, 3640.0),
    ("AXISBANK", "Axis Bank", Sector::Banking, 1090.0),
    ("BAJFINANCE", "Bajaj Finance", Sector::Nbfc, 6820.0),
    ("ASIANPAINT", "Asian Paints", Sector::Consumer, 2890.0),
    ("MARUTI", "Maruti Suzuki", Sector::Auto, 12400.0),
    ("WIPRO", "Wipro", Sector::It, 480.0),
    ("TATAMOTORS", "Tata Motors", Sector::Auto, 920.0),
    ("SUNPHARMA", "Sun Pharmaceutical", Sector::Pharma, 1580.0),
    ("TITAN", "Titan Company", Sector::Consumer, 3380.0),
    ("NESTLEIND", "Nestle India", Sector::Fmcg, 24500.0),
    ("POWERGRID", "Power Grid Corp", Sector::Power, 285.0),
];

/// Ordered, immutable list of securities.
#[derive(Debug, Clone)]
pub struct Catalog {
    securities: Vec<Security>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::large_cap()
    }
}

impl Catalog {
    /// The built-in twenty-symbol large-cap universe.
    pub fn large_cap() -> Self {
        let securities = LARGE_CAP_UNIVERSE
            .iter()
            .map(|&(symbol, name, sector, base_price)| Security::new(symbol, name, sector, base_price))
            .collect();
        Self { securities }
    }

    /// Build a catalog from an already validated list, preserving order.
    pub fn from_securities(securities: Vec<Security>) -> Self {
        Self { securities }
    }

    pub fn securities(&self) -> &[Security] {
        &self.securities
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }

    pub fn find(&self, symbol: &str) -> Option<&Security> {
        self.securities.iter().find(|s| s.symbol == symbol)
    }

    /// Returns the matching descriptor, or [`Security::fallback`] on a miss.
    pub fn lookup(&self, symbol: &str) -> Security {
        match self.find(symbol) {
            Some(security) => security.clone(),
            None => {
                tracing::warn!(symbol, "symbol not in catalog, using fallback base price");
                Security::fallback(symbol)
            }
        }
    }
}
