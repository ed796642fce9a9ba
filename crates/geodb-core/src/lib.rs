// crates/geodb-core/src/lib.rs

//! # geodb-core
//!
//! In-memory countries → states → cities dataset with secondary indexes,
//! a validated query layer, and a lazily built, single-flight cache.
//!
//! ```no_run
//! use geodb_core::DatasetCache;
//!
//! # async fn run() -> geodb_core::Result<()> {
//! let cache = DatasetCache::from_path("data/countries_states_cities.json");
//! let index = cache.ensure_ready().await?;
//!
//! let afghanistan = index.get_country_by_iso("af")?;
//! for state in index.list_states(&afghanistan.id.to_string())? {
//!     println!("{}", state.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod common;
pub mod error;
pub mod index;
pub mod loader; // The public loader
pub mod model;
pub mod query;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::cache::{CacheState, DatasetCache};
pub use crate::common::DbStats;
pub use crate::error::{BuildError, Entity, GeoError, LoadError, QueryError, Result};
pub use crate::index::GeoIndex;
pub use crate::loader::{load_countries, FileSource};
pub use crate::model::{City, CityWithState, Country, CountrySummary, State, StateWithCountry};
pub use crate::traits::DatasetSource;

pub mod prelude {
    //! Bring common types and traits into scope for demos and tools.
    pub use crate::{
        CacheState, City, CityWithState, Country, CountrySummary, DatasetCache, DatasetSource,
        DbStats, Entity, GeoError, GeoIndex, LoadError, QueryError, Result, State,
        StateWithCountry,
    };
}
