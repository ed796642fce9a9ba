use clap::{Parser, Subcommand};
use geodb_core::loader::DEFAULT_DATASET_PATH;
use std::path::PathBuf;

/// CLI arguments for geodb-cli
#[derive(Debug, Parser)]
#[command(
    name = "geodb",
    version,
    about = "Inspect a country/state/city dataset from the terminal"
)]
pub struct CliArgs {
    /// Path to the dataset (JSON array of countries; `.json.gz` also accepted)
    #[arg(
        short = 'i',
        long = "input",
        global = true,
        env = "GEODB_DATA",
        default_value = DEFAULT_DATASET_PATH
    )]
    pub input: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// List all countries
    Countries,

    /// Look up a country by numeric id or ISO2/ISO3 code
    Country {
        /// Numeric id (e.g. 82) or ISO code (e.g. DE, usa)
        key: String,
    },

    /// List the states of a country
    States {
        /// Numeric country id
        country_id: String,
    },

    /// Search countries whose name contains a substring
    Search {
        /// Substring to search (case-insensitive)
        term: String,
    },

    /// List regions, with their subregions
    Regions,
}
