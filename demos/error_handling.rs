//! Error handling with geodb-core
//!
//! Shows how the three error families surface: a dataset that cannot be
//! loaded, input that fails validation, and lookups that find nothing.

use geodb_api::loader::DEFAULT_DATASET_PATH;
use geodb_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== geodb-core Error Handling ===\n");

    // Example 1: A missing dataset. The cache stays retryable.
    println!("--- Example 1: Build failure ---");
    let broken = DatasetCache::from_path("does/not/exist.json");
    match broken.ensure_ready().await {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!(
        "  state: {:?}, attempts so far: {}",
        broken.state(),
        broken.build_attempts()
    );
    println!();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());
    let db = DatasetCache::from_path(path).ensure_ready().await?;

    // Example 2: Validation errors are distinct from not-found.
    println!("--- Example 2: Invalid ids and ISO codes ---");
    for raw in ["abc", "", "12abc", "99999999999999999999"] {
        report(&format!("country {raw:?}"), db.get_country_by_id(raw).map(|c| c.name.as_str()));
    }
    for code in ["", "A", "ABCD", "zz", "de"] {
        report(&format!("iso {code:?}"), db.get_country_by_iso(code).map(|c| c.name.as_str()));
    }
    println!();

    // Example 3: Matching on the error kind.
    println!("--- Example 3: Matching on QueryError ---");
    match db.get_state_by_id("-1") {
        Ok(state) => println!("  found {}", state.state.name),
        Err(QueryError::NotFound(entity)) => println!("  no such {entity}"),
        Err(QueryError::InvalidArgument(msg)) => println!("  rejected: {msg}"),
    }

    // Example 4: `?` lifts every family into GeoError.
    let lookup = || -> Result<String> {
        let state = db.get_state_by_id("130")?;
        Ok(format!("{} in {}", state.state.name, state.country_name))
    };
    match lookup() {
        Ok(found) => println!("  state 130: {found}"),
        Err(e) => println!("  state 130: {e}"),
    }

    Ok(())
}

fn report(label: &str, outcome: std::result::Result<&str, QueryError>) {
    match outcome {
        Ok(name) => println!("  {label}: found {name}"),
        Err(e) => println!("  {label}: {e}"),
    }
}
