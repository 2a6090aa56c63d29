//! Economic indicator and health insurance time series requests
//!
//! Both series are open endpoints: no API key is sent.

use super::CensusClient;
use crate::error::Result;
use crate::models::{EconSubset, Geography, Table, TimePeriod};
use crate::query::QueryBuilder;

const ECON_HINT: &str =
    "this subset or time period was not found; try valid inputs for the economic indicators series";
const HEALTH_HINT: &str = "this state, county, or year was not found; \
     try valid inputs for the small area health insurance estimates";

impl CensusClient {
    /// Economic indicator time series for housing or residential construction
    pub async fn economic_indicators(
        &self,
        subset: EconSubset,
        period: TimePeriod,
    ) -> Result<Table> {
        let query = self.econ_query(subset, period);
        self.fetch(query, ECON_HINT).await
    }

    fn econ_query(&self, subset: EconSubset, period: TimePeriod) -> QueryBuilder {
        self.query(format!("data/timeseries/eits/{}", subset.dataset()))
            .param(
                "get",
                "cell_value,data_type_code,time_slot_id,category_code,seasonally_adj",
            )
            .param("time", period.to_param())
    }

    /// Counts of insured and uninsured people by county and state
    pub async fn health_insurance(
        &self,
        year: u16,
        state: Option<&str>,
        county: Option<&str>,
    ) -> Result<Table> {
        let query = self.health_query(year, state, county)?;
        self.fetch(query, HEALTH_HINT).await
    }

    fn health_query(
        &self,
        year: u16,
        state: Option<&str>,
        county: Option<&str>,
    ) -> Result<QueryBuilder> {
        let geo = Geography::counties(state, county)?;
        let mut query = self
            .query("data/timeseries/healthins/sahie")
            .param("get", "NIC_PT,NUI_PT")
            .param("for", geo.for_param());
        if let Some(in_param) = geo.in_param() {
            query = query.param("in", in_param);
        }
        Ok(query.param("time", year.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_econ_single_year_url() {
        let url = CensusClient::new()
            .econ_query(EconSubset::Housing, TimePeriod::Year(2018))
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/timeseries/eits/hv\
             ?get=cell_value,data_type_code,time_slot_id,category_code,seasonally_adj&time=2018"
        );
    }

    #[test]
    fn test_econ_range_url() {
        let period = TimePeriod::range((2018, 1), (2019, 12)).unwrap();
        let url = CensusClient::new()
            .econ_query(EconSubset::ResidentialConstruction, period)
            .url();
        assert!(url.contains("/eits/resconst?"));
        assert!(url.ends_with("time=from+2018-01+to+2019-12"));
    }

    #[test]
    fn test_health_url() {
        let url = CensusClient::new()
            .health_query(2018, Some("02"), None)
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/timeseries/healthins/sahie\
             ?get=NIC_PT,NUI_PT&for=county:*&in=state:02&time=2018"
        );
    }

    #[test]
    fn test_open_endpoints_never_send_the_key() {
        let client = CensusClient::new().with_api_key("SECRET");
        let econ = client.econ_query(EconSubset::Housing, TimePeriod::Year(2018));
        assert!(!econ.url().contains("SECRET"));

        let health = client.health_query(2018, None, None).unwrap();
        assert!(!health.url().contains("SECRET"));
    }
}
