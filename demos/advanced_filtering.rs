//! Advanced filtering with geodb-core
//!
//! Combines the query layer with plain iterator code: region breakdowns,
//! name search, and ranking states by city count.

use geodb_api::loader::DEFAULT_DATASET_PATH;
use geodb_api::prelude::*;
use std::collections::BTreeMap;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== geodb-core Advanced Filtering ===\n");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());
    let db = DatasetCache::from_path(path).ensure_ready().await?;

    // Example 1: Subregions per region, with country counts
    println!("--- Example 1: Region breakdown ---");
    for region in db.list_regions() {
        let mut per_subregion: BTreeMap<&str, usize> = BTreeMap::new();
        for country in db.countries_by_region(region) {
            let sub = country.subregion.as_deref().unwrap_or("(none)");
            *per_subregion.entry(sub).or_default() += 1;
        }
        println!("{region}");
        for (sub, n) in per_subregion {
            println!("  {sub}: {n}");
        }
    }
    println!();

    // Example 2: Case-insensitive name search
    println!("--- Example 2: Countries containing 'land' ---");
    for country in db.search_countries_by_name("LAND") {
        println!("- {} ({})", country.name, country.iso3);
    }
    println!();

    // Example 3: Top 10 states by number of cities
    println!("--- Example 3: Top 10 states by number of cities ---");
    let mut states: Vec<_> = db.iter_states().collect();
    states.sort_by(|(a, _), (b, _)| b.cities.len().cmp(&a.cities.len()));
    for (i, (state, country)) in states.iter().take(10).enumerate() {
        println!(
            "{}. {} ({}) - {} cities",
            i + 1,
            state.name,
            country.name,
            state.cities.len()
        );
    }
    println!();

    // Example 4: Countries with no states at all
    println!("--- Example 4: Countries without states ---");
    let stateless: Vec<_> = db
        .countries()
        .iter()
        .filter(|c| c.states.is_empty())
        .map(|c| c.name.as_str())
        .collect();
    println!("{} countries: {}", stateless.len(), stateless.join(", "));

    Ok(())
}
