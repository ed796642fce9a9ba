//! Basic usage of geodb-core
//!
//! Builds the dataset through the cache, then walks the main lookups:
//! list, id and ISO lookup, states, cities and regions.
//!
//! ```text
//! cargo run --example basic_usage -- data/countries_states_cities.json
//! ```

use geodb_api::loader::DEFAULT_DATASET_PATH;
use geodb_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== geodb-core Basic Usage ===\n");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATASET_PATH.to_string());

    let cache = DatasetCache::from_path(&path);
    println!("Cache state before first use: {:?}", cache.state());
    let db = cache.ensure_ready().await?;
    println!("Cache state after build:      {:?}\n", cache.state());

    // Example 1: All countries
    println!("--- Example 1: List countries ---");
    let countries = db.list_countries();
    println!("Total countries: {}", countries.len());
    for (i, country) in countries.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, country.name, country.iso2);
    }
    println!();

    // Example 2: Same country, three keys
    println!("--- Example 2: Lookup by id and ISO code ---");
    if let Some(first) = countries.first() {
        let by_id = db.get_country_by_id(&first.id.to_string())?;
        let by_iso2 = db.get_country_by_iso(&first.iso2.to_lowercase())?;
        println!("Found: {} (id {})", by_id.name, by_id.id);
        println!("Same record via ISO2: {}", by_id == by_iso2);
        println!("Number of states: {}", by_id.states.len());
    }
    println!();

    // Example 3: States and cities of a country
    println!("--- Example 3: States and cities ---");
    if let Some(first) = countries.first() {
        let id = first.id.to_string();
        for state in db.list_states(&id)?.iter().take(5) {
            println!("- {} ({} cities)", state.name, state.cities.len());
        }
        let cities = db.list_cities_of_country(&id)?;
        for city in cities.iter().take(5) {
            println!("  {} / {}", city.state_name, city.city.name);
        }
    }
    println!();

    // Example 4: Regions
    println!("--- Example 4: Regions ---");
    for region in db.list_regions() {
        println!("{region}: {} countries", db.countries_by_region(region).len());
    }
    println!();

    let stats = db.stats();
    println!(
        "Totals: {} countries, {} states, {} cities",
        stats.countries, stats.states, stats.cities
    );

    Ok(())
}
