//! geodb-cli
//! ==========
//!
//! Offline inspection of a dataset file through the same query layer the
//! HTTP server uses. The binary is a thin wrapper around [`run`].
//!
//! ```text
//! geodb-cli stats
//! geodb-cli country 82
//! geodb-cli country deu
//! geodb-cli --input data/world.json.gz search land
//! ```

pub mod args;

use anyhow::{Context, Result};
use geodb_core::{load_countries, GeoIndex};
use std::io::Write;

pub use crate::args::{CliArgs, Commands};

/// Loads the dataset named by `args` and prints the command's output.
pub fn run(args: &CliArgs, out: &mut impl Write) -> Result<()> {
    let countries = load_countries(&args.input)?;
    let db = GeoIndex::build(countries);
    execute(&db, &args.command, out)
}

/// Runs one command against an already built index.
pub fn execute(db: &GeoIndex, command: &Commands, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Stats => {
            let stats = db.stats();
            writeln!(out, "Dataset statistics:")?;
            writeln!(out, "  Countries: {}", stats.countries)?;
            writeln!(out, "  States/Regions: {}", stats.states)?;
            writeln!(out, "  Cities: {}", stats.cities)?;
        }

        Commands::Countries => {
            for c in db.list_countries() {
                writeln!(out, "{:>5}  {} ({})", c.id, c.name, c.iso2)?;
            }
        }

        Commands::Country { key } => {
            let is_id = key.trim().starts_with(|ch: char| ch.is_ascii_digit() || ch == '-');
            let country = if is_id {
                db.get_country_by_id(key)
            } else {
                db.get_country_by_iso(key)
            }
            .with_context(|| format!("no country for {key:?}"))?;

            writeln!(out, "Country: {}", country.name)?;
            writeln!(out, "Id: {}", country.id)?;
            writeln!(out, "ISO2: {}", country.iso2)?;
            writeln!(out, "ISO3: {}", country.iso3)?;
            writeln!(out, "Region: {}", country.region().unwrap_or("-"))?;
            writeln!(out, "Subregion: {}", country.subregion().unwrap_or("-"))?;
            if let Some(capital) = country.extra.get("capital").and_then(|v| v.as_str()) {
                writeln!(out, "Capital: {capital}")?;
            }
            writeln!(out, "States: {}", country.states.len())?;
        }

        Commands::States { country_id } => {
            let country = db
                .get_country_by_id(country_id)
                .with_context(|| format!("no country for {country_id:?}"))?;
            writeln!(out, "States in {}:", country.name)?;
            for s in &country.states {
                writeln!(out, "- {} [{}] ({} cities)", s.name, s.id, s.cities.len())?;
            }
        }

        Commands::Search { term } => {
            let matches = db.search_countries_by_name(term);
            if matches.is_empty() {
                writeln!(out, "No countries found matching: {term}")?;
            }
            for c in matches {
                writeln!(out, "{} ({})", c.name, c.iso2)?;
            }
        }

        Commands::Regions => {
            for region in db.list_regions() {
                writeln!(out, "{region}")?;
                let mut subregions: Vec<&str> = db
                    .countries_by_region(region)
                    .into_iter()
                    .filter_map(|c| c.subregion.as_deref().filter(|s| !s.is_empty()))
                    .collect();
                subregions.sort_unstable();
                subregions.dedup();
                for sub in subregions {
                    writeln!(out, "  {sub}")?;
                }
            }
        }
    }

    Ok(())
}
