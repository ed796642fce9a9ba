// crates/geodb-core/src/error.rs
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Failure while reading or parsing the dataset file.
///
/// A `LoadError` fails the build attempt that hit it; the cache stays
/// retryable and the next caller starts a fresh build.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse JSON {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The background build task panicked or was torn down with the runtime.
    #[error("Dataset build was interrupted: {0}")]
    Interrupted(String),
}

/// A build failure as seen by every caller that awaited that build.
pub type BuildError = Arc<LoadError>;

/// Which kind of entity a lookup was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Country,
    State,
}

impl Entity {
    pub(crate) fn invalid_id(self) -> QueryError {
        match self {
            Entity::Country => QueryError::InvalidArgument("Invalid country ID"),
            Entity::State => QueryError::InvalidArgument("Invalid state ID"),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Country => f.write_str("Country"),
            Entity::State => f.write_str("State"),
        }
    }
}

/// Client-side query failures. Both variants are safe to show to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The input failed format validation (non-integer id, bad ISO length).
    #[error("{0}")]
    InvalidArgument(&'static str),

    /// The input was well formed but nothing matches it.
    #[error("{0} not found")]
    NotFound(Entity),
}

/// Crate-wide error for callers that drive loading and querying together
/// (CLI, demos).
#[derive(Debug, Error)]
pub enum GeoError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

pub type Result<T> = std::result::Result<T, GeoError>;
