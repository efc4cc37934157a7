//! Global type definitions.

use std::path::PathBuf;

use csv::StringRecord;

/// One line of the input, split on commas and trimmed.
pub type Row = StringRecord;

/// 1-based position of a row in the file.
pub type RowNumber = usize;

pub const DEFAULT_PATH: &str = "sample_data.csv";
pub const TARGET_ROW: RowNumber = 2;
pub const TARGET_COLUMN: usize = 1;
pub const SEPARATOR_WIDTH: usize = 80;
pub const DELIMITER: char = ',';

#[derive(Debug, Clone)]
pub struct Config {
	pub path: PathBuf,
	pub target_row: RowNumber,
	/// 0-based
	pub target_column: usize,
	pub search_term: Option<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			path: PathBuf::from(DEFAULT_PATH),
			target_row: TARGET_ROW,
			target_column: TARGET_COLUMN,
			search_term: None,
		}
	}
}

/// Parse Row
///
/// Split a raw line on every literal comma and trim each field of control characters and spaces.
/// Quotes carry no meaning, so a comma inside a value always starts a new field. Trailing fields
/// that are empty before trimming are dropped, unless the line has no comma at all: `"a,b,,"`
/// gives `["a", "b"]`, `","` gives no fields and `""` gives a single empty field.
pub fn parse_row(line: &str) -> Row {
	let mut fields: Vec<&str> = line.split(DELIMITER).collect();
	if fields.len() > 1 {
		while fields.last() == Some(&"") {
			fields.pop();
		}
	}
	fields.into_iter().map(trim_field).collect()
}

/// Strips everything up to and including U+0020 from both ends, leaving other Unicode
/// whitespace (e.g. non-breaking spaces) in place.
fn trim_field(field: &str) -> &str {
	field.trim_matches(|c: char| c <= ' ')
}
