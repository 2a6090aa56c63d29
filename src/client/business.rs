//! Annual Survey of Entrepreneurs requests

use super::CensusClient;
use crate::error::{CensusError, Result};
use crate::models::{Geography, Table};
use crate::query::QueryBuilder;

const ENTREPRENEURSHIP_HINT: &str =
    "this state, year, or key was not found; try valid inputs for the entrepreneurship survey";
const BUSINESS_HINT: &str =
    "this state, year, or key was not found; try valid inputs for the business characteristics survey";

impl CensusClient {
    /// Company summary data on entrepreneurship, by state or metro area
    pub async fn entrepreneurship(&self, year: u16, scope: &Geography) -> Result<Table> {
        let query = self.ase_query(year, "csa", "VET_GROUP_LABEL", scope)?;
        self.fetch(query, ENTREPRENEURSHIP_HINT).await
    }

    /// Characteristics of businesses, by state or metro area
    pub async fn business_characteristics(&self, year: u16, scope: &Geography) -> Result<Table> {
        let query = self.ase_query(year, "cscb", "RCPPDEMP_F", scope)?;
        self.fetch(query, BUSINESS_HINT).await
    }

    fn ase_query(
        &self,
        year: u16,
        dataset: &str,
        variables: &str,
        scope: &Geography,
    ) -> Result<QueryBuilder> {
        match scope {
            Geography::AllStates | Geography::State(_) | Geography::Metro => {}
            other => {
                return Err(CensusError::geography(format!(
                    "entrepreneurship data is published by state or metro area, not {:?}",
                    other
                )))
            }
        }

        let key = self.require_key()?;
        Ok(self
            .query(format!("data/{}/ase/{}", year, dataset))
            .param("get", variables)
            .param("for", scope.for_param())
            .key(Some(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CensusClient {
        CensusClient::new().with_api_key("MYKEY")
    }

    #[test]
    fn test_entrepreneurship_state_url() {
        let url = client()
            .ase_query(2016, "csa", "VET_GROUP_LABEL", &Geography::AllStates)
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2016/ase/csa?get=VET_GROUP_LABEL&for=state:*&key=MYKEY"
        );
    }

    #[test]
    fn test_entrepreneurship_metro_url() {
        let url = client()
            .ase_query(2016, "csa", "VET_GROUP_LABEL", &Geography::Metro)
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2016/ase/csa?get=VET_GROUP_LABEL\
             &for=metropolitan%20statistical%20area/micropolitan%20statistical%20area:*&key=MYKEY"
        );
    }

    #[test]
    fn test_business_url() {
        let url = client()
            .ase_query(2016, "cscb", "RCPPDEMP_F", &Geography::State("06".into()))
            .unwrap()
            .url();
        assert_eq!(
            url,
            "https://api.census.gov/data/2016/ase/cscb?get=RCPPDEMP_F&for=state:06&key=MYKEY"
        );
    }

    #[test]
    fn test_rejects_county_scope() {
        let geo = Geography::counties(Some("06"), None).unwrap();
        assert!(client().ase_query(2016, "csa", "VET_GROUP_LABEL", &geo).is_err());
    }
}
