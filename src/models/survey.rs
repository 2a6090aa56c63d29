//! Typed survey parameters

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CensusError;

lazy_static! {
    static ref GROUP_RE: Regex = Regex::new(r"^[A-Z]{1,3}[0-9]{2,6}[A-Z0-9]{0,3}$").unwrap();
    static ref SECTOR_RE: Regex = Regex::new(r"^[0-9]{2}(-[0-9]{2})?$").unwrap();
}

/// American Community Survey estimate span
///
/// The Bureau publishes 1-, 3-, and 5-year estimates; an N-year estimate
/// ending in year Y covers the window starting at Y - N + 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcsEstimate {
    /// 1-year estimates
    #[default]
    OneYear,
    /// 3-year estimates
    ThreeYear,
    /// 5-year estimates
    FiveYear,
}

impl AcsEstimate {
    /// Dataset path segment (`acs1`, `acs3`, `acs5`)
    pub fn dataset(&self) -> &'static str {
        match self {
            Self::OneYear => "acs1",
            Self::ThreeYear => "acs3",
            Self::FiveYear => "acs5",
        }
    }

    /// Number of years covered
    pub fn span(&self) -> u16 {
        match self {
            Self::OneYear => 1,
            Self::ThreeYear => 3,
            Self::FiveYear => 5,
        }
    }

    /// First year covered by an estimate ending in `year`
    pub fn start_year(&self, year: u16) -> u16 {
        year.saturating_sub(self.span() - 1)
    }
}

impl TryFrom<u8> for AcsEstimate {
    type Error = CensusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::OneYear),
            3 => Ok(Self::ThreeYear),
            5 => Ok(Self::FiveYear),
            other => Err(CensusError::InvalidEstimate(other)),
        }
    }
}

/// Kind of ACS profile table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
    /// Subject tables
    Subject,
    /// Comparison profiles
    Comparison,
}

impl ProfileKind {
    /// Dataset path segment under the 1-year ACS
    pub fn dataset(&self) -> &'static str {
        match self {
            Self::Subject => "acs1/profile",
            Self::Comparison => "acs1/cprofile",
        }
    }
}

/// An ACS table group code such as `B01001`, `CP05`, or `S0201`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableGroup(String);

impl TableGroup {
    /// The group code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TableGroup {
    type Err = CensusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if GROUP_RE.is_match(&code) {
            Ok(Self(code))
        } else {
            Err(CensusError::InvalidGroup(s.to_string()))
        }
    }
}

impl fmt::Display for TableGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A NAICS sector code, a 2-digit code or a 2-digit range such as `31-33`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sector(String);

impl Sector {
    /// The sector code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Sector {
    type Err = CensusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if SECTOR_RE.is_match(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(CensusError::InvalidSector(s.to_string()))
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Economic indicator time series subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EconSubset {
    /// Housing vacancies and homeownership
    Housing,
    /// New residential construction
    ResidentialConstruction,
}

impl EconSubset {
    /// Dataset path segment under `timeseries/eits`
    pub fn dataset(&self) -> &'static str {
        match self {
            Self::Housing => "hv",
            Self::ResidentialConstruction => "resconst",
        }
    }
}

impl FromStr for EconSubset {
    type Err = CensusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hv" => Ok(Self::Housing),
            "resconst" => Ok(Self::ResidentialConstruction),
            other => Err(CensusError::Other(format!(
                "unknown economic subset '{}': expected 'hv' or 'resconst'",
                other
            ))),
        }
    }
}

/// Cross-section of the Annual Survey of Manufactures time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsmCrossSection {
    /// Per-state series
    State,
    /// Per-industry series
    Industry,
}

impl AsmCrossSection {
    /// Dataset path segment under `timeseries/asm`
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Industry => "industry",
        }
    }
}

/// Time selector for time series endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePeriod {
    /// A single calendar year (`time=2018`)
    Year(u16),
    /// A month range (`time=from+2018-01+to+2019-12`)
    Range {
        /// First year and month, inclusive
        from: (u16, u8),
        /// Last year and month, inclusive
        to: (u16, u8),
    },
}

impl TimePeriod {
    /// Build a month range, validating month numbers and ordering
    pub fn range(from: (u16, u8), to: (u16, u8)) -> Result<Self, CensusError> {
        for (_, month) in [from, to] {
            if !(1..=12).contains(&month) {
                return Err(CensusError::InvalidTimePeriod(format!(
                    "month {} is out of range",
                    month
                )));
            }
        }
        if to < from {
            return Err(CensusError::InvalidTimePeriod(format!(
                "range ends ({}-{:02}) before it starts ({}-{:02})",
                to.0, to.1, from.0, from.1
            )));
        }
        Ok(Self::Range { from, to })
    }

    /// Value of the `time=` parameter
    pub fn to_param(&self) -> String {
        match self {
            Self::Year(year) => year.to_string(),
            Self::Range { from, to } => format!(
                "from+{}-{:02}+to+{}-{:02}",
                from.0, from.1, to.0, to.1
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_from_span() {
        assert_eq!(AcsEstimate::try_from(1).unwrap(), AcsEstimate::OneYear);
        assert_eq!(AcsEstimate::try_from(5).unwrap(), AcsEstimate::FiveYear);
        assert!(AcsEstimate::try_from(2).is_err());
    }

    #[test]
    fn test_estimate_dataset() {
        assert_eq!(AcsEstimate::OneYear.dataset(), "acs1");
        assert_eq!(AcsEstimate::ThreeYear.dataset(), "acs3");
        assert_eq!(AcsEstimate::FiveYear.dataset(), "acs5");
    }

    #[test]
    fn test_estimate_window() {
        assert_eq!(AcsEstimate::ThreeYear.start_year(2010), 2008);
        assert_eq!(AcsEstimate::OneYear.start_year(2019), 2019);
    }

    #[test]
    fn test_group_parse() {
        assert_eq!("B01001".parse::<TableGroup>().unwrap().as_str(), "B01001");
        assert_eq!("cp05".parse::<TableGroup>().unwrap().as_str(), "CP05");
        assert_eq!("S0201".parse::<TableGroup>().unwrap().as_str(), "S0201");
        assert_eq!("K200101".parse::<TableGroup>().unwrap().as_str(), "K200101");
        assert!("".parse::<TableGroup>().is_err());
        assert!("01B".parse::<TableGroup>().is_err());
    }

    #[test]
    fn test_sector_parse() {
        assert_eq!("54".parse::<Sector>().unwrap().as_str(), "54");
        assert_eq!("31-33".parse::<Sector>().unwrap().as_str(), "31-33");
        assert!("manufacturing".parse::<Sector>().is_err());
        assert!("5".parse::<Sector>().is_err());
    }

    #[test]
    fn test_econ_subset() {
        assert_eq!("hv".parse::<EconSubset>().unwrap(), EconSubset::Housing);
        assert_eq!(EconSubset::ResidentialConstruction.dataset(), "resconst");
        assert!("housing".parse::<EconSubset>().is_err());
    }

    #[test]
    fn test_time_period() {
        assert_eq!(TimePeriod::Year(2018).to_param(), "2018");
        let range = TimePeriod::range((2018, 1), (2019, 12)).unwrap();
        assert_eq!(range.to_param(), "from+2018-01+to+2019-12");
        assert!(TimePeriod::range((2018, 13), (2019, 1)).is_err());
        assert!(TimePeriod::range((2019, 6), (2018, 6)).is_err());
    }
}
