//! Program entrypoint and argument parsing.

use std::env;
use std::io;

use anyhow::{anyhow, Result};

use csv_reader::process;
use csv_reader::types::Config;

static ARG_MSG: &str = "Expected at most two positional arguments: [path to CSV file] [search term]";

/// Parse Args
///
/// Parse up to two optional positional arguments into a `Config`. Anything not given falls back
/// to the defaults, so running without arguments reads `sample_data.csv`.
fn parse_args() -> Result<Config> {
	let mut args = env::args().skip(1);
	if args.len() > 2 {
		return Err(anyhow!(ARG_MSG));
	}
	let mut config = Config::default();
	if let Some(path) = args.next() {
		config.path = path.into();
	}
	config.search_term = args.next();
	Ok(config)
}

fn main() -> Result<()> {
	env_logger::init();
	let config = parse_args()?;
	log::debug!("{:?}", config);
	let mut output = io::stdout();
	if let Err(err) = process::run(&config, &mut output) {
		log::error!("{:#}", err);
		process::report_failure(&err, &mut output)?;
	}
	Ok(())
}
