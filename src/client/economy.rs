//! Manufacturing and business pattern requests

use super::CensusClient;
use crate::error::Result;
use crate::models::{AsmCrossSection, Geography, Sector, Table};
use crate::query::QueryBuilder;

const MANUFACTURING_HINT: &str = "this state, year, or manufacturing sector code was not found; \
     try valid inputs for the Annual Survey of Manufactures";
const NONEMPLOYER_HINT: &str = "this state, year, or sector code was not found; \
     try valid inputs for the nonemployer statistics series";
const CBP_HINT: &str = "this state, year, or sector code was not found; \
     try valid inputs for County Business Patterns";

impl CensusClient {
    /// National employment figures for a manufacturing sector
    ///
    /// The area series names its NAICS variables after the survey year, and
    /// the `YEAR` filter is the year following the survey.
    pub async fn manufacturing(&self, year: u16, sector: &Sector) -> Result<Table> {
        let query = self.manufacturing_query(year, sector)?;
        self.fetch(query, MANUFACTURING_HINT).await
    }

    fn manufacturing_query(&self, year: u16, sector: &Sector) -> Result<QueryBuilder> {
        let key = self.require_key()?;
        let naics = format!("NAICS{}", year);
        Ok(self
            .query(format!("data/timeseries/asm/area{}", year))
            .param("get", format!("{}_LABEL,{},EMP", naics, naics))
            .param("for", Geography::NationalSeries.for_param())
            .param("YEAR", (year + 1).to_string())
            .param(naics, sector.as_str())
            .key(Some(key)))
    }

    /// Manufacturing sector data across the state or industry cross-section
    pub async fn state_manufacturing(
        &self,
        year: u16,
        sector: &Sector,
        cross_section: AsmCrossSection,
        state: Option<&str>,
    ) -> Result<Table> {
        let query = self.state_manufacturing_query(year, sector, cross_section, state)?;
        self.fetch(query, MANUFACTURING_HINT).await
    }

    fn state_manufacturing_query(
        &self,
        year: u16,
        sector: &Sector,
        cross_section: AsmCrossSection,
        state: Option<&str>,
    ) -> Result<QueryBuilder> {
        let geo = Geography::state(state)?;
        let key = self.require_key()?;
        Ok(self
            .query(format!("data/timeseries/asm/{}", cross_section.path_segment()))
            .param("get", "NAICS_TTL,EMP,GEO_TTL")
            .param("for", geo.for_param())
            .param("YEAR", year.to_string())
            .param("NAICS", sector.as_str())
            .key(Some(key)))
    }

    /// Receipts of self-employed businesses for all counties of a state
    pub async fn nonemployer(
        &self,
        year: u16,
        sector: &Sector,
        state: Option<&str>,
    ) -> Result<Table> {
        let query = self.nonemployer_query(year, sector, state)?;
        self.fetch(query, NONEMPLOYER_HINT).await
    }

    fn nonemployer_query(
        &self,
        year: u16,
        sector: &Sector,
        state: Option<&str>,
    ) -> Result<QueryBuilder> {
        let geo = Geography::counties(state, None)?;
        let key = self.require_key()?;
        let mut query = self
            .query(format!("data/{}/nonemp", year))
            .param("get", "NRCPTOT,NAME")
            .param("for", geo.for_param());
        if let Some(in_param) = geo.in_param() {
            query = query.param("in", in_param);
        }
        Ok(query
            .param(format!("NAICS{}", year), sector.as_str())
            .key(Some(key)))
    }

    /// Establishment counts by legal form of organization, per state
    ///
    /// County Business Patterns labels its NAICS variables with the prior
    /// year's vintage, and needs no API key.
    pub async fn county_business_patterns(
        &self,
        year: u16,
        sector: &Sector,
        state: Option<&str>,
    ) -> Result<Table> {
        let query = self.cbp_query(year, sector, state)?;
        self.fetch(query, CBP_HINT).await
    }

    fn cbp_query(&self, year: u16, sector: &Sector, state: Option<&str>) -> Result<QueryBuilder> {
        let geo = Geography::state(state)?;
        let naics = format!("NAICS{}", year - 1);
        Ok(self
            .query(format!("data/{}/cbp", year))
            .param("get", format!("ESTAB,LFO,{}_LABEL,NAME", naics))
            .param("for", geo.for_param())
            .param(naics, sector.as_str()))
    }
}
