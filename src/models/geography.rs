//! Geographic filters for Census queries
//!
//! Geography reaches the API as `for=` and `in=` clauses, e.g.
//! `for=county:*&in=state:06`. States are 2-digit FIPS codes, counties
//! 3-digit; `*` selects everything.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CensusError, Result};

lazy_static! {
    static ref STATE_RE: Regex = Regex::new(r"^[0-9]{2}$").unwrap();
    static ref COUNTY_RE: Regex = Regex::new(r"^[0-9]{3}$").unwrap();
}

/// `for=` clause for metropolitan and micropolitan statistical areas
const METRO_CLAUSE: &str = "metropolitan statistical area/micropolitan statistical area:*";

/// A geographic filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Geography {
    /// The single national row (`for=us:1`)
    Nation,
    /// The national series (`for=us:*`)
    NationalSeries,
    /// Every state
    AllStates,
    /// One state by FIPS code
    State(String),
    /// Every county, optionally within one state
    AllCounties {
        /// Containing state; `None` means all states
        state: Option<String>,
    },
    /// One county within a state (or within all states)
    County {
        /// Containing state; `None` means all states
        state: Option<String>,
        /// 3-digit county FIPS code
        county: String,
    },
    /// All metropolitan/micropolitan statistical areas
    Metro,
}

impl Geography {
    /// Build a state filter from a FIPS code, `"*"`, or nothing
    pub fn state(code: Option<&str>) -> Result<Self> {
        match normalize(code) {
            None => Ok(Self::AllStates),
            Some(code) if STATE_RE.is_match(code) => Ok(Self::State(code.to_string())),
            Some(code) => Err(CensusError::geography(format!(
                "'{}' is not a 2-digit state FIPS code",
                code
            ))),
        }
    }

    /// Build a county filter; either part may be a wildcard
    pub fn counties(state: Option<&str>, county: Option<&str>) -> Result<Self> {
        let state = match normalize(state) {
            None => None,
            Some(code) if STATE_RE.is_match(code) => Some(code.to_string()),
            Some(code) => {
                return Err(CensusError::geography(format!(
                    "'{}' is not a 2-digit state FIPS code",
                    code
                )))
            }
        };

        match normalize(county) {
            None => Ok(Self::AllCounties { state }),
            Some(code) if COUNTY_RE.is_match(code) => Ok(Self::County {
                state,
                county: code.to_string(),
            }),
            Some(code) => Err(CensusError::geography(format!(
                "'{}' is not a 3-digit county FIPS code",
                code
            ))),
        }
    }

    /// Value of the `for=` parameter
    pub fn for_param(&self) -> String {
        match self {
            Self::Nation => "us:1".to_string(),
            Self::NationalSeries => "us:*".to_string(),
            Self::AllStates => "state:*".to_string(),
            Self::State(code) => format!("state:{}", code),
            Self::AllCounties { .. } => "county:*".to_string(),
            Self::County { county, .. } => format!("county:{}", county),
            Self::Metro => METRO_CLAUSE.to_string(),
        }
    }

    /// Value of the `in=` parameter, when the filter needs one
    pub fn in_param(&self) -> Option<String> {
        match self {
            Self::AllCounties { state } | Self::County { state, .. } => Some(format!(
                "state:{}",
                state.as_deref().unwrap_or("*")
            )),
            _ => None,
        }
    }
}

fn normalize(code: Option<&str>) -> Option<&str> {
    match code {
        None | Some("*") | Some("") => None,
        Some(code) => Some(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_filter() {
        assert_eq!(Geography::state(None).unwrap(), Geography::AllStates);
        assert_eq!(Geography::state(Some("*")).unwrap(), Geography::AllStates);
        assert_eq!(
            Geography::state(Some("06")).unwrap(),
            Geography::State("06".to_string())
        );
        assert!(Geography::state(Some("6")).is_err());
        assert!(Geography::state(Some("CA")).is_err());
    }

    #[test]
    fn test_state_params() {
        let geo = Geography::state(Some("02")).unwrap();
        assert_eq!(geo.for_param(), "state:02");
        assert_eq!(geo.in_param(), None);
    }

    #[test]
    fn test_county_params() {
        let geo = Geography::counties(Some("06"), None).unwrap();
        assert_eq!(geo.for_param(), "county:*");
        assert_eq!(geo.in_param().as_deref(), Some("state:06"));

        let geo = Geography::counties(None, Some("037")).unwrap();
        assert_eq!(geo.for_param(), "county:037");
        assert_eq!(geo.in_param().as_deref(), Some("state:*"));

        assert!(Geography::counties(Some("06"), Some("37")).is_err());
    }

    #[test]
    fn test_fixed_clauses() {
        assert_eq!(Geography::Nation.for_param(), "us:1");
        assert_eq!(Geography::NationalSeries.for_param(), "us:*");
        assert_eq!(
            Geography::Metro.for_param(),
            "metropolitan statistical area/micropolitan statistical area:*"
        );
    }
}
