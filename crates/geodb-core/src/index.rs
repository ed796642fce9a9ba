// crates/geodb-core/src/index.rs

//! # Indexes
//!
//! [`GeoIndex`] owns the dataset and every lookup structure derived from
//! it. It is built once, never mutated afterwards, and shared behind an
//! `Arc` by the cache.

use crate::common::DbStats;
use crate::model::nested::non_empty;
use crate::model::{Country, CountrySummary, State};
use crate::text::fold_case;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// Position of a state inside the nested tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StateSlot {
    country: usize,
    state: usize,
}

/// The immutable, fully indexed dataset.
#[derive(Debug, Clone, Default)]
pub struct GeoIndex {
    /// Input order, duplicates included.
    countries: Vec<Country>,
    /// One entry per input record, same order as `countries`.
    summaries: Vec<CountrySummary>,
    /// Lowercased summary names, parallel to `summaries`.
    search_keys: Vec<String>,

    by_country_id: BTreeMap<i64, usize>,
    by_iso2: HashMap<String, usize>,
    by_iso3: HashMap<String, usize>,
    by_state_id: HashMap<i64, StateSlot>,

    regions: Vec<String>,
    subregions: Vec<String>,
}

impl GeoIndex {
    /// Builds every index from the parsed dataset.
    ///
    /// - Country ids: last record wins when an id repeats.
    /// - ISO codes and state ids: resolved over the id index in ascending id
    ///   order, first match wins. Duplicate state ids are logged.
    /// - Regions / subregions: distinct, non-empty, sorted.
    pub fn build(countries: Vec<Country>) -> Self {
        let summaries: Vec<CountrySummary> = countries.iter().map(CountrySummary::from).collect();
        let search_keys = summaries.iter().map(|s| fold_case(&s.name)).collect();

        let mut by_country_id = BTreeMap::new();
        for (slot, country) in countries.iter().enumerate() {
            if let Some(shadowed) = by_country_id.insert(country.id, slot) {
                debug!(country_id = country.id, shadowed, slot, "duplicate country id, keeping the later record");
            }
        }

        let mut by_iso2 = HashMap::with_capacity(by_country_id.len());
        let mut by_iso3 = HashMap::with_capacity(by_country_id.len());
        let mut by_state_id = HashMap::new();
        let mut regions = BTreeSet::new();
        let mut subregions = BTreeSet::new();
        let mut duplicate_states = 0usize;

        for &slot in by_country_id.values() {
            let country = &countries[slot];

            if !country.iso2.is_empty() {
                by_iso2.entry(country.iso2.to_uppercase()).or_insert(slot);
            }
            if !country.iso3.is_empty() {
                by_iso3.entry(country.iso3.to_uppercase()).or_insert(slot);
            }
            if let Some(region) = country.region() {
                regions.insert(region.to_string());
            }
            if let Some(subregion) = country.subregion() {
                subregions.insert(subregion.to_string());
            }

            for (state_slot, state) in country.states.iter().enumerate() {
                match by_state_id.entry(state.id) {
                    Entry::Vacant(entry) => {
                        entry.insert(StateSlot {
                            country: slot,
                            state: state_slot,
                        });
                    }
                    Entry::Occupied(entry) => {
                        duplicate_states += 1;
                        debug!(
                            state_id = state.id,
                            kept_country = countries[entry.get().country].id,
                            skipped_country = country.id,
                            "duplicate state id"
                        );
                    }
                }
            }
        }

        if duplicate_states > 0 {
            warn!(duplicate_states, "state ids repeat across countries; first occurrence wins");
        }

        GeoIndex {
            countries,
            summaries,
            search_keys,
            by_country_id,
            by_iso2,
            by_iso3,
            by_state_id,
            regions: regions.into_iter().collect(),
            subregions: subregions.into_iter().collect(),
        }
    }

    /// Number of country records, duplicates included.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// All country records in dataset order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn summaries(&self) -> &[CountrySummary] {
        &self.summaries
    }

    pub(crate) fn summaries_with_keys(&self) -> impl Iterator<Item = (&CountrySummary, &str)> {
        self.summaries
            .iter()
            .zip(self.search_keys.iter().map(String::as_str))
    }

    pub fn country(&self, id: i64) -> Option<&Country> {
        self.by_country_id.get(&id).map(|&slot| &self.countries[slot])
    }

    /// ISO2 lookup, case-insensitive.
    pub fn country_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.by_iso2
            .get(&iso2.to_uppercase())
            .map(|&slot| &self.countries[slot])
    }

    /// ISO3 lookup, case-insensitive.
    pub fn country_by_iso3(&self, iso3: &str) -> Option<&Country> {
        self.by_iso3
            .get(&iso3.to_uppercase())
            .map(|&slot| &self.countries[slot])
    }

    /// A state together with the country that owns it.
    pub fn state(&self, id: i64) -> Option<(&State, &Country)> {
        self.by_state_id.get(&id).map(|slot| {
            let country = &self.countries[slot.country];
            (&country.states[slot.state], country)
        })
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn subregions(&self) -> &[String] {
        &self.subregions
    }

    /// Aggregate statistics for the database.
    pub fn stats(&self) -> DbStats {
        let mut stats = DbStats {
            countries: self.countries.len(),
            ..DbStats::default()
        };
        for country in &self.countries {
            stats.states += country.states.len();
            stats.cities += country.states.iter().map(|s| s.cities.len()).sum::<usize>();
        }
        stats
    }

    /// Borrowed view of every state, with its country, in id-index order.
    pub fn iter_states(&self) -> impl Iterator<Item = (&State, &Country)> {
        self.by_country_id.values().flat_map(move |&slot| {
            let country = &self.countries[slot];
            country.states.iter().map(move |state| (state, country))
        })
    }
}
