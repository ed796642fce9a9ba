// crates/geodb-core/src/model/nested.rs

//! # The Nested Model
//!
//! The dataset is a tree: `Vec<Country>` -> `Vec<State>` -> `Vec<City>`.
//! Only the fields the indexes need are typed; everything else a record
//! carries is kept in `extra` and written back out unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A country record, owning its states.
///
/// Typed text fields that were missing (or `null`) are left out again when
/// the record is serialized, so no key appears that the source lacked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub iso2: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub iso3: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,

    // Pass-through attributes (capital, currency, timezones, translations, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub states: Vec<State>,
}

/// A state / region inside a country. State ids are expected to be unique
/// across the whole dataset, not just within their country.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub cities: Vec<City>,
}

/// A city. Apart from `id` and `name` the record is opaque.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Country {
    /// Region, treating an empty string like a missing one.
    pub fn region(&self) -> Option<&str> {
        non_empty(self.region.as_deref())
    }

    pub fn subregion(&self) -> Option<&str> {
        non_empty(self.subregion.as_deref())
    }
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// `null` and a missing key both become `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_or_null_children_become_empty() {
        let country: Country = serde_json::from_value(json!({
            "id": 7,
            "name": "Nowhere",
            "iso2": "NW",
            "iso3": "NWH",
            "states": null
        }))
        .unwrap();
        assert!(country.states.is_empty());
        assert_eq!(country.region(), None);

        let state: State = serde_json::from_value(json!({ "id": 1, "name": "Empty" })).unwrap();
        assert!(state.cities.is_empty());
    }

    #[test]
    fn unknown_city_attributes_pass_through() {
        let raw = json!({
            "id": 52,
            "name": "Kabul",
            "latitude": "34.52813000",
            "longitude": "69.17233000",
            "wikiDataId": "Q5838"
        });
        let city: City = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(city.extra["wikiDataId"], "Q5838");
        assert_eq!(serde_json::to_value(&city).unwrap(), raw);
    }

    #[test]
    fn missing_keys_stay_missing_when_serialized() {
        let raw = json!({
            "id": 5,
            "iso2": "XX",
            "iso3": "XXX",
            "states": [{"id": 9, "cities": [{"id": 1}]}]
        });
        let country: Country = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&country).unwrap(), raw);
    }

    #[test]
    fn empty_region_is_treated_as_absent() {
        let country: Country = serde_json::from_value(json!({
            "id": 1, "name": "Antarctica", "iso2": "AQ", "iso3": "ATA",
            "region": "", "subregion": null
        }))
        .unwrap();
        assert_eq!(country.region(), None);
        assert_eq!(country.subregion(), None);
    }
}
