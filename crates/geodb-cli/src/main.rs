//! geodb-cli: inspect a country/state/city dataset from the terminal.
//!
//! - Show overall stats
//!   $ geodb stats
//!
//! - Show a country by id or ISO code (case-insensitive)
//!   $ geodb country 82
//!   $ geodb country deu
//!
//! - List the states of a country
//!   $ geodb states 82
//!
//! By default the dataset is read from `data/countries_states_cities.json`;
//! use `--input <path>` (or `GEODB_DATA`) to point at another file.

use clap::Parser;
use geodb_cli::{run, CliArgs};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}
