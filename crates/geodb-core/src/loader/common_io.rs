// crates/geodb-core/src/loader/common_io.rs
use crate::error::LoadError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the name
/// ends in `.gz`. The caller doesn't care about the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    {
        if is_gzip(path) {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
    }

    Ok(Box::new(reader))
}

/// Reads the whole (decompressed) file into memory.
///
/// Decompression failures surface here, as read errors, so a later parse
/// failure always means the JSON itself is malformed.
pub fn read_all(path: &Path) -> Result<Vec<u8>, LoadError> {
    let mut stream = open_stream(path)?;
    let mut data = Vec::new();
    stream
        .read_to_end(&mut data)
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(data)
}

#[cfg(feature = "compact")]
fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
