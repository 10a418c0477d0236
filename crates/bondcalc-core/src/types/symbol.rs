//! Treasury benchmark symbols and bond type labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BondError;

/// Standard US Treasury benchmark maturities (`US1M` … `US30Y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TreasurySymbol {
    /// 1-month bill
    M1,
    /// 3-month bill
    M3,
    /// 6-month bill
    M6,
    /// 1-year
    Y1,
    /// 2-year note
    Y2,
    /// 3-year note
    Y3,
    /// 5-year note
    Y5,
    /// 7-year note
    Y7,
    /// 10-year note
    Y10,
    /// 20-year bond
    Y20,
    /// 30-year bond
    Y30,
}

impl TreasurySymbol {
    /// Every benchmark, shortest first.
    pub const ALL: [TreasurySymbol; 11] = [
        TreasurySymbol::M1,
        TreasurySymbol::M3,
        TreasurySymbol::M6,
        TreasurySymbol::Y1,
        TreasurySymbol::Y2,
        TreasurySymbol::Y3,
        TreasurySymbol::Y5,
        TreasurySymbol::Y7,
        TreasurySymbol::Y10,
        TreasurySymbol::Y20,
        TreasurySymbol::Y30,
    ];

    /// Ticker code, e.g. `US10Y`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TreasurySymbol::M1 => "US1M",
            TreasurySymbol::M3 => "US3M",
            TreasurySymbol::M6 => "US6M",
            TreasurySymbol::Y1 => "US1Y",
            TreasurySymbol::Y2 => "US2Y",
            TreasurySymbol::Y3 => "US3Y",
            TreasurySymbol::Y5 => "US5Y",
            TreasurySymbol::Y7 => "US7Y",
            TreasurySymbol::Y10 => "US10Y",
            TreasurySymbol::Y20 => "US20Y",
            TreasurySymbol::Y30 => "US30Y",
        }
    }

    /// Tenor in years.
    #[must_use]
    pub fn years(&self) -> f64 {
        match self {
            TreasurySymbol::M1 => 1.0 / 12.0,
            TreasurySymbol::M3 => 0.25,
            TreasurySymbol::M6 => 0.5,
            TreasurySymbol::Y1 => 1.0,
            TreasurySymbol::Y2 => 2.0,
            TreasurySymbol::Y3 => 3.0,
            TreasurySymbol::Y5 => 5.0,
            TreasurySymbol::Y7 => 7.0,
            TreasurySymbol::Y10 => 10.0,
            TreasurySymbol::Y20 => 20.0,
            TreasurySymbol::Y30 => 30.0,
        }
    }

    /// Short tenor label, e.g. `10-Year` or `3-Month`.
    #[must_use]
    pub fn tenor_label(&self) -> String {
        let tenor = &self.code()[2..];
        let (count, unit) = tenor.split_at(tenor.len() - 1);
        match unit {
            "M" => format!("{count}-Month"),
            _ => format!("{count}-Year"),
        }
    }

    /// Display name, e.g. `10-Year Treasury`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} Treasury", self.tenor_label())
    }
}

impl fmt::Display for TreasurySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TreasurySymbol {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        TreasurySymbol::ALL
            .into_iter()
            .find(|sym| sym.code() == upper)
            .ok_or_else(|| {
                BondError::invalid_input("symbol", format!("unknown treasury symbol '{s}'"))
            })
    }
}

impl TryFrom<String> for TreasurySymbol {
    type Error = BondError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TreasurySymbol> for String {
    fn from(sym: TreasurySymbol) -> Self {
        sym.code().to_string()
    }
}

/// Where a priced bond's terms came from.
///
/// Serialized as the symbol code or `CUSTOM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BondType {
    /// A benchmark treasury priced off its market yield.
    Treasury(TreasurySymbol),
    /// User-entered terms and yield.
    #[default]
    Custom,
}

impl BondType {
    /// Treasury symbol, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<TreasurySymbol> {
        match self {
            BondType::Treasury(sym) => Some(*sym),
            BondType::Custom => None,
        }
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondType::Treasury(sym) => write!(f, "{sym}"),
            BondType::Custom => f.write_str("CUSTOM"),
        }
    }
}

impl FromStr for BondType {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("custom") {
            Ok(BondType::Custom)
        } else {
            s.parse().map(BondType::Treasury)
        }
    }
}

impl TryFrom<String> for BondType {
    type Error = BondError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BondType> for String {
    fn from(kind: BondType) -> Self {
        kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_parse() {
        assert_eq!("US10Y".parse::<TreasurySymbol>(), Ok(TreasurySymbol::Y10));
        assert_eq!("us3m".parse::<TreasurySymbol>(), Ok(TreasurySymbol::M3));
        assert!("US4Y".parse::<TreasurySymbol>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(TreasurySymbol::Y10.display_name(), "10-Year Treasury");
        assert_eq!(TreasurySymbol::M6.display_name(), "6-Month Treasury");
        assert_eq!(TreasurySymbol::Y30.tenor_label(), "30-Year");
    }

    #[test]
    fn test_bond_type_serde() {
        let json = serde_json::to_string(&BondType::Treasury(TreasurySymbol::Y2)).unwrap();
        assert_eq!(json, "\"US2Y\"");
        let custom: BondType = serde_json::from_str("\"CUSTOM\"").unwrap();
        assert_eq!(custom, BondType::Custom);
        assert_eq!(custom.symbol(), None);
    }
}
