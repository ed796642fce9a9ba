// crates/geodb-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and the single JSON
//! parse pass that turns the dataset file into `Vec<Country>`.

use crate::error::LoadError;
use crate::model::Country;
use crate::traits::DatasetSource;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod common_io;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/countries_states_cities.json";

/// Reads `path` in full and parses it as a JSON array of countries.
///
/// Read failures (missing file, permissions, broken gzip) and parse
/// failures (malformed JSON, wrong shape) are reported as distinct
/// [`LoadError`] variants. No retries happen here.
pub fn load_countries(path: impl AsRef<Path>) -> Result<Vec<Country>, LoadError> {
    let path = path.as_ref();
    let data = common_io::read_all(path)?;
    debug!(path = %path.display(), bytes = data.len(), "dataset read");

    serde_json::from_slice(&data).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A [`DatasetSource`] backed by a JSON (or `.json.gz`) file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSource {
    fn default() -> Self {
        FileSource::new(DEFAULT_DATASET_PATH)
    }
}

impl DatasetSource for FileSource {
    fn load(&self) -> Result<Vec<Country>, LoadError> {
        load_countries(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
