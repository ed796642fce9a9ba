// crates/geodb-core/src/traits.rs
use crate::error::LoadError;
use crate::model::Country;

/// Where the dataset comes from.
///
/// The cache only knows this trait, so the storage can be swapped (a file
/// on disk, a gzipped file, an in-memory fixture) without touching the
/// build coordination. `load` is called on the blocking thread pool and
/// may take as long as it needs.
///
/// Any `Fn() -> Result<Vec<Country>, LoadError>` closure is a source too:
///
/// ```rust
/// use geodb_core::traits::DatasetSource;
/// use geodb_core::{Country, LoadError};
///
/// let empty = || -> Result<Vec<Country>, LoadError> { Ok(Vec::new()) };
/// assert!(empty.load().unwrap().is_empty());
/// ```
pub trait DatasetSource: Send + Sync + 'static {
    /// Read and parse the full dataset, in file order.
    fn load(&self) -> Result<Vec<Country>, LoadError>;

    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String {
        "in-memory dataset".to_string()
    }
}

impl<F> DatasetSource for F
where
    F: Fn() -> Result<Vec<Country>, LoadError> + Send + Sync + 'static,
{
    fn load(&self) -> Result<Vec<Country>, LoadError> {
        self()
    }
}
