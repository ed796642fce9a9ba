// crates/geodb-core/src/model/views.rs
use super::nested::{City, Country, State};
use serde::{Deserialize, Serialize};

/// Reduced projection of a [`Country`] used by list, search and region
/// responses, so they don't ship the nested state/city tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub id: i64,
    pub name: String,
    pub iso2: String,
    pub iso3: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
}

impl From<&Country> for CountrySummary {
    fn from(c: &Country) -> Self {
        CountrySummary {
            id: c.id,
            name: c.name.clone(),
            iso2: c.iso2.clone(),
            iso3: c.iso3.clone(),
            region: c.region.clone(),
            subregion: c.subregion.clone(),
        }
    }
}

/// A state serialized together with the name of the country that owns it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StateWithCountry<'a> {
    #[serde(flatten)]
    pub state: &'a State,
    pub country_name: &'a str,
}

/// A city serialized together with the name of its state.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CityWithState<'a> {
    #[serde(flatten)]
    pub city: &'a City,
    pub state_name: &'a str,
}

impl<'a> CityWithState<'a> {
    /// All cities of `state`, in dataset order, tagged with its name.
    pub fn all_in(state: &'a State) -> impl Iterator<Item = CityWithState<'a>> + 'a {
        state.cities.iter().map(move |city| CityWithState {
            city,
            state_name: &state.name,
        })
    }
}
