// crates/geodb-core/src/model/mod.rs
pub mod nested;
pub mod views;

pub use nested::{City, Country, State};
pub use views::{CityWithState, CountrySummary, StateWithCountry};
