//! us-census - US Census Bureau survey data from the command line
//!
//! us-census fetches survey tables from the Census Data API and decodes
//! them into plain tabular data, with an on-disk response cache and
//! pretty/JSON/CSV output.
//!
//! # Supported surveys
//!
//! - **ACS**: detailed tables, subject tables, comparison profiles,
//!   selected population profiles, supplemental estimates
//! - **Business**: entrepreneurship survey, business characteristics
//! - **Economy**: Annual Survey of Manufactures, nonemployer statistics,
//!   County Business Patterns
//! - **Time series**: economic indicators, small area health insurance
//!   estimates
//!
//! # Quick Start
//!
//! ```bash
//! # Age and sex detailed tables for 2019, nationwide
//! us-census acs 2019 B01001
//!
//! # Restaurants per state as CSV (no API key needed)
//! us-census cbp 2018 72 --format csv
//!
//! # Housing indicators across two years
//! us-census econ hv 2018 --through 2019
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;

// Re-export commonly used types
pub use client::CensusClient;
pub use error::{CensusError, Result};
pub use models::{
    AcsEstimate, AsmCrossSection, EconSubset, Geography, ProfileKind, Sector, Table, TableGroup,
    TimePeriod,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Quick fetch of ACS 1-year detailed tables for simple use cases
///
/// # Arguments
///
/// * `year` - Survey year, e.g. 2019
/// * `group` - Table group code, e.g. "B01001"
/// * `key` - API key requested from census.gov
///
/// # Example
///
/// ```no_run
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let table = us_census::detailed_tables(2019, "B01001", "MYKEY").await?;
///
///     println!("{} rows", table.len());
///     Ok(())
/// }
/// ```
pub async fn detailed_tables(year: u16, group: &str, key: &str) -> Result<Table> {
    let group: TableGroup = group.parse()?;
    let client = CensusClient::new().with_api_key(key);
    client
        .detailed_tables(year, &group, AcsEstimate::OneYear)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "us-census");
    }
}
