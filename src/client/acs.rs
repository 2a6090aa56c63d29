//! American Community Survey requests

use super::CensusClient;
use crate::error::{CensusError, Result};
use crate::models::{AcsEstimate, Geography, ProfileKind, Table, TableGroup};
use crate::query::QueryBuilder;

const GROUP_HINT: &str =
    "this group was not found; try a valid group for the American Community Survey year data";
const SUPPLEMENTAL_HINT: &str =
    "this state, year, or key was not found; try valid inputs for the American Community Survey supplemental estimates";

impl CensusClient {
    /// Detailed tables for a group, e.g. group `B01001` for 2019
    ///
    /// An N-year estimate ending in `year` covers the window starting at
    /// `year - N + 1`.
    pub async fn detailed_tables(
        &self,
        year: u16,
        group: &TableGroup,
        estimate: AcsEstimate,
    ) -> Result<Table> {
        let query = self.detailed_tables_query(year, group, estimate)?;
        self.fetch(query, GROUP_HINT).await
    }

    fn detailed_tables_query(
        &self,
        year: u16,
        group: &TableGroup,
        estimate: AcsEstimate,
    ) -> Result<QueryBuilder> {
        let key = self.require_key()?;
        Ok(self
            .query(format!("data/{}/acs/{}", year, estimate.dataset()))
            .param("get", format!("NAME,group({})", group))
            .param("for", Geography::Nation.for_param())
            .key(Some(key)))
    }

    /// Subject tables or comparison profiles for a group
    pub async fn profile(&self, year: u16, group: &TableGroup, kind: ProfileKind) -> Result<Table> {
        let query = self.profile_query(year, group, kind)?;
        self.fetch(query, GROUP_HINT).await
    }

    fn profile_query(
        &self,
        year: u16,
        group: &TableGroup,
        kind: ProfileKind,
    ) -> Result<QueryBuilder> {
        let key = self.require_key()?;
        Ok(self
            .query(format!("data/{}/acs/{}", year, kind.dataset()))
            .param("get", format!("group({})", group))
            .param("for", Geography::Nation.for_param())
            .key(Some(key)))
    }

    /// Selected population profiles for a group and population subgroup
    pub async fn population_profile(
        &self,
        year: u16,
        group: &TableGroup,
        popgroup: &str,
    ) -> Result<Table> {
        let query = self.population_profile_query(year, group, popgroup)?;
        self.fetch(query, GROUP_HINT).await
    }

    fn population_profile_query(
        &self,
        year: u16,
        group: &TableGroup,
        popgroup: &str,
    ) -> Result<QueryBuilder> {
        if popgroup.is_empty() || !popgroup.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CensusError::InvalidGroup(popgroup.to_string()));
        }

        let key = self.require_key()?;
        Ok(self
            .query(format!("data/{}/acs/acs1/spp", year))
            .param("get", format!("NAME,group({})", group))
            .param("for", Geography::Nation.for_param())
            .param("POPGROUP", popgroup)
            .key(Some(key)))
    }

    /// Selected supplemental estimates, for all states or one state
    pub async fn supplemental(&self, year: u16, state: Option<&str>) -> Result<Table> {
        let query = self.supplemental_query(year, state)?;
        self.fetch(query, SUPPLEMENTAL_HINT).await
    }

    fn supplemental_query(&self, year: u16, state: Option<&str>) -> Result<QueryBuilder> {
        let geo = Geography::state(state)?;
        let key = self.require_key()?;
        Ok(self
            .query(format!("data/{}/acs/acsse", year))
            .param("get", "NAME,K200101_001E")
            .param("for", geo.for_param())
            .key(Some(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CensusClient {
        CensusClient::new().with_api_key("MYKEY")
    }

    fn group(code: &str) -> TableGroup {
        code.parse().unwrap()
    }

    #[test]
    fn test_detailed_tables_url() {
        let url = client()
            .detailed_tables_query(2019, &group("B01001"), AcsEstimate::OneYear)
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2019/acs/acs1?get=NAME,group(B01001)&for=us:1&key=MYKEY"
        );
    }

    #[test]
    fn test_detailed_tables_five_year_url() {
        let url = client()
            .detailed_tables_query(2015, &group("B01001"), AcsEstimate::FiveYear)
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2015/acs/acs5?get=NAME,group(B01001)&for=us:1&key=MYKEY"
        );
    }

    #[test]
    fn test_profile_urls() {
        let url = client()
            .profile_query(2019, &group("CP05"), ProfileKind::Comparison)
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2019/acs/acs1/cprofile?get=group(CP05)&for=us:1&key=MYKEY"
        );

        let url = client()
            .profile_query(2019, &group("S0201"), ProfileKind::Subject)
            .unwrap()
            .url();
        assert!(url.contains("/acs/acs1/profile?"));
    }

    #[test]
    fn test_population_profile_url() {
        let url = client()
            .population_profile_query(2009, &group("S0201"), "001")
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2009/acs/acs1/spp?get=NAME,group(S0201)&for=us:1&POPGROUP=001&key=MYKEY"
        );
    }

    #[test]
    fn test_population_profile_rejects_bad_popgroup() {
        assert!(client()
            .population_profile_query(2009, &group("S0201"), "00 1")
            .is_err());
    }

    #[test]
    fn test_supplemental_urls() {
        let url = client().supplemental_query(2019, None).unwrap().url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2019/acs/acsse?get=NAME,K200101_001E&for=state:*&key=MYKEY"
        );

        let url = client().supplemental_query(2019, Some("02")).unwrap().url();
        assert!(url.contains("for=state:02"));
    }

    #[test]
    fn test_keyed_endpoints_need_a_key() {
        let client = CensusClient::new();
        assert!(client
            .detailed_tables_query(2019, &group("B01001"), AcsEstimate::OneYear)
            .is_err());
        assert!(client.supplemental_query(2019, None).is_err());
    }
}
