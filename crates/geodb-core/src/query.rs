// crates/geodb-core/src/query.rs

//! # Query Engine
//!
//! Validated, read-only operations over a built [`GeoIndex`]. Inputs arrive
//! as the raw strings a caller typed (path segments, CLI args); each
//! operation validates its own input and reports
//! [`QueryError::InvalidArgument`] or [`QueryError::NotFound`].
//!
//! Everything here is synchronous and allocation-light: results borrow from
//! the index whenever possible.

use crate::error::{Entity, QueryError};
use crate::index::GeoIndex;
use crate::model::{CityWithState, Country, CountrySummary, State, StateWithCountry};
use crate::text::{equals_folded, fold_case, parse_leading_int, IntPrefixError};

/// Parses a country or state id.
///
/// No digits at all is the entity's "Invalid ... ID". A well-formed number
/// too large for `i64` cannot match any record, so it is `NotFound`.
pub fn parse_id(raw: &str, entity: Entity) -> Result<i64, QueryError> {
    match parse_leading_int(raw) {
        Ok(id) => Ok(id),
        Err(IntPrefixError::NoDigits) => Err(entity.invalid_id()),
        Err(IntPrefixError::OutOfRange) => Err(QueryError::NotFound(entity)),
    }
}

/// Uppercases an ISO code and checks it is 2 or 3 characters long.
/// Length is measured after uppercasing.
pub fn normalize_iso_code(code: &str) -> Result<String, QueryError> {
    let upper = code.to_uppercase();
    match upper.chars().count() {
        2 | 3 => Ok(upper),
        _ => Err(QueryError::InvalidArgument("Invalid ISO code format")),
    }
}

impl GeoIndex {
    /// Every country summary, in dataset order.
    pub fn list_countries(&self) -> &[CountrySummary] {
        self.summaries()
    }

    pub fn get_country_by_id(&self, raw_id: &str) -> Result<&Country, QueryError> {
        let id = parse_id(raw_id, Entity::Country)?;
        self.country(id).ok_or(QueryError::NotFound(Entity::Country))
    }

    /// Looks a country up by ISO code: two characters match `iso2`, three
    /// match `iso3`, anything else is rejected. Case-insensitive.
    ///
    /// ```rust
    /// use geodb_core::{Country, GeoIndex, QueryError};
    ///
    /// let afghanistan: Country = serde_json::from_str(
    ///     r#"{"id": 1, "name": "Afghanistan", "iso2": "AF", "iso3": "AFG"}"#,
    /// ).unwrap();
    /// let index = GeoIndex::build(vec![afghanistan]);
    ///
    /// assert_eq!(index.get_country_by_iso("af").unwrap().id, 1);
    /// assert_eq!(index.get_country_by_iso("AFG").unwrap().id, 1);
    /// assert!(matches!(index.get_country_by_iso("AFGH"), Err(QueryError::InvalidArgument(_))));
    /// ```
    pub fn get_country_by_iso(&self, code: &str) -> Result<&Country, QueryError> {
        let code = normalize_iso_code(code)?;
        let found = match code.chars().count() {
            2 => self.country_by_iso2(&code),
            _ => self.country_by_iso3(&code),
        };
        found.ok_or(QueryError::NotFound(Entity::Country))
    }

    /// States of a country, possibly empty.
    pub fn list_states(&self, raw_country_id: &str) -> Result<&[State], QueryError> {
        self.get_country_by_id(raw_country_id)
            .map(|country| country.states.as_slice())
    }

    pub fn get_state_by_id(&self, raw_state_id: &str) -> Result<StateWithCountry<'_>, QueryError> {
        let id = parse_id(raw_state_id, Entity::State)?;
        let (state, country) = self.state(id).ok_or(QueryError::NotFound(Entity::State))?;
        Ok(StateWithCountry {
            state,
            country_name: &country.name,
        })
    }

    /// Every city of a country, state order then city order, each tagged
    /// with its state's name.
    pub fn list_cities_of_country(
        &self,
        raw_country_id: &str,
    ) -> Result<Vec<CityWithState<'_>>, QueryError> {
        let country = self.get_country_by_id(raw_country_id)?;
        Ok(country.states.iter().flat_map(CityWithState::all_in).collect())
    }

    pub fn list_cities_of_state(
        &self,
        raw_state_id: &str,
    ) -> Result<Vec<CityWithState<'_>>, QueryError> {
        let id = parse_id(raw_state_id, Entity::State)?;
        let (state, _) = self.state(id).ok_or(QueryError::NotFound(Entity::State))?;
        Ok(CityWithState::all_in(state).collect())
    }

    /// Countries whose name contains `term`, ignoring case. An empty term
    /// matches everything.
    pub fn search_countries_by_name(&self, term: &str) -> Vec<&CountrySummary> {
        let needle = fold_case(term);
        self.summaries_with_keys()
            .filter(|(_, key)| key.contains(needle.as_str()))
            .map(|(summary, _)| summary)
            .collect()
    }

    pub fn list_regions(&self) -> &[String] {
        self.regions()
    }

    pub fn list_subregions(&self) -> &[String] {
        self.subregions()
    }

    /// Countries whose region equals `region`, ignoring case.
    pub fn countries_by_region(&self, region: &str) -> Vec<&CountrySummary> {
        self.filter_summaries(region, |s| s.region.as_deref())
    }

    /// Countries whose subregion equals `subregion`, ignoring case.
    pub fn countries_by_subregion(&self, subregion: &str) -> Vec<&CountrySummary> {
        self.filter_summaries(subregion, |s| s.subregion.as_deref())
    }

    fn filter_summaries<F>(&self, wanted: &str, field: F) -> Vec<&CountrySummary>
    where
        F: Fn(&CountrySummary) -> Option<&str>,
    {
        self.summaries()
            .iter()
            .filter(|s| {
                field(s)
                    .filter(|v| !v.is_empty())
                    .is_some_and(|v| equals_folded(v, wanted))
            })
            .collect()
    }
}
