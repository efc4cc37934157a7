//! Reading, cell access and searching over a CSV file.
//!
//! Each operation opens the file itself and reads it from the start, line by line. Nothing is
//! kept in memory between operations.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::{parse_row, Config, Row, RowNumber, SEPARATOR_WIDTH};

/// Run
///
/// Read and print every row of the configured file, then print the configured cell and, when a
/// search term is set, every matching row. If the file is missing only the usage hint is printed.
pub fn run<W: Write>(config: &Config, output: &mut W) -> Result<()> {
	let mut buffered = BufWriter::new(output);
	let result = run_buffered(config, &mut buffered);
	// Flush whatever was written before a failure so the report follows it in order
	buffered.flush()?;
	result
}

fn run_buffered<W: Write>(config: &Config, output: &mut W) -> Result<()> {
	if read_csv_file(&config.path, output)?.is_none() {
		return Ok(());
	}
	access_cell(
		&config.path,
		config.target_row,
		config.target_column,
		output,
	)?;
	if let Some(term) = &config.search_term {
		search_value(&config.path, term, output)?;
	}
	Ok(())
}

/// Read CSV File
///
/// Print a banner followed by every row of the file at `path`, then the total row count. A
/// missing file is not an error: a diagnostic and usage hint are printed and `None` is returned.
pub fn read_csv_file<W: Write>(path: &Path, output: &mut W) -> Result<Option<usize>> {
	if !path.exists() {
		log::debug!("Missing file '{}'", path.display());
		write_usage_hint(output, path)?;
		return Ok(None);
	}
	let input = open(path)?;

	let separator = "=".repeat(SEPARATOR_WIDTH);
	writeln!(output, "\n{}", separator)?;
	writeln!(output, "Reading CSV File: {}", path.display())?;
	writeln!(output, "{}", separator)?;

	let rows = read_rows(input, output)
		.with_context(|| format!("Failed reading '{}'", path.display()))?;

	writeln!(output, "\n[SUCCESS] Total rows read: {}", rows)?;
	Ok(Some(rows))
}

/// Read Rows
///
/// Print every line of `input` as a numbered row, returning the number of rows printed. A read
/// error abandons the remaining lines.
pub fn read_rows<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<usize> {
	let mut row_number = 0;
	for line in RawLines::new(input) {
		let line = line?;
		row_number += 1;
		write_row(output, row_number, &parse_row(&line))?;
	}
	Ok(row_number)
}

/// Access Cell
///
/// Print the value at `target_row` (1-based) and `target_column` (0-based) of the file at `path`.
/// Prints nothing further if the row doesn't exist or is too short.
pub fn access_cell<W: Write>(
	path: &Path,
	target_row: RowNumber,
	target_column: usize,
	output: &mut W,
) -> Result<Option<String>> {
	writeln!(
		output,
		"\n--- Accessing Specific Cell (Row {}, Column {}) ---",
		target_row, target_column
	)?;
	let input = open(path)?;
	let value = find_cell(input, target_row, target_column)
		.with_context(|| format!("Failed reading '{}'", path.display()))?;
	if let Some(value) = &value {
		writeln!(
			output,
			"Value at Row {}, Column {}: {}",
			target_row, target_column, value
		)?;
	}
	Ok(value)
}

/// Find Cell
///
/// Scan `input` up to and including `target_row` and return the trimmed field at
/// `target_column`. Nothing after the target row is read.
pub fn find_cell<R: BufRead>(
	input: R,
	target_row: RowNumber,
	target_column: usize,
) -> Result<Option<String>> {
	for (index, line) in RawLines::new(input).enumerate() {
		let line = line?;
		if index + 1 == target_row {
			let row = parse_row(&line);
			let value = row.get(target_column).map(str::to_owned);
			if value.is_none() {
				log::debug!(
					"Ignoring column {} beyond row {} with {} fields",
					target_column,
					target_row,
					row.len()
				);
			}
			return Ok(value);
		}
	}
	log::debug!("Ignoring missing row {}", target_row);
	Ok(None)
}

/// Search Value
///
/// Print every raw line of the file at `path` that contains `term`, ignoring case, along with its
/// row number. Prints `Not found.` when nothing matches. Returns the matching row numbers.
pub fn search_value<W: Write>(path: &Path, term: &str, output: &mut W) -> Result<Vec<RowNumber>> {
	writeln!(output, "\n--- Searching for: {} ---", term)?;
	let input = open(path)?;
	let matches = search_rows(input, term, output)
		.with_context(|| format!("Failed reading '{}'", path.display()))?;

	if matches.is_empty() {
		writeln!(output, "Not found.")?;
	}
	Ok(matches)
}

/// Search Rows
///
/// Print every line of `input` containing `term`, ignoring case, as soon as it is read. Matching
/// is done against the whole raw line, so a term spanning a comma matches too.
pub fn search_rows<R: BufRead, W: Write>(
	input: R,
	term: &str,
	output: &mut W,
) -> Result<Vec<RowNumber>> {
	let term = term.to_lowercase();
	let mut matches = Vec::new();
	for (index, line) in RawLines::new(input).enumerate() {
		let line = line?;
		if line.to_lowercase().contains(&term) {
			writeln!(output, "Found in Row {}: {}", index + 1, line)?;
			matches.push(index + 1);
		}
	}
	log::debug!("{} rows matched '{}'", matches.len(), term);
	Ok(matches)
}

/// Report Failure
///
/// Print a failed run's error along with steps to get a readable file in place.
pub fn report_failure<W: Write>(err: &anyhow::Error, output: &mut W) -> Result<()> {
	writeln!(output, "Error reading file: {:#}", err)?;
	writeln!(output, "\nMake sure to:")?;
	writeln!(output, "1. Create an Excel file")?;
	writeln!(output, "2. Save it as CSV format (.csv)")?;
	writeln!(output, "3. Place it in the same folder as this program")?;
	output.flush()?;
	Ok(())
}

/// Lines of a reader, split on `\n` with any `\r` before it removed. Bytes that aren't valid
/// UTF-8 become U+FFFD instead of failing the read.
struct RawLines<R> {
	input: R,
	buf: Vec<u8>,
}

impl<R: BufRead> RawLines<R> {
	fn new(input: R) -> Self {
		Self {
			input,
			buf: Vec::new(),
		}
	}
}

impl<R: BufRead> Iterator for RawLines<R> {
	type Item = io::Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		self.buf.clear();
		match self.input.read_until(b'\n', &mut self.buf) {
			Ok(0) => None,
			Ok(_) => {
				if self.buf.last() == Some(&b'\n') {
					self.buf.pop();
					if self.buf.last() == Some(&b'\r') {
						self.buf.pop();
					}
				}
				Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
			}
			Err(err) => Some(Err(err)),
		}
	}
}

fn open(path: &Path) -> Result<BufReader<File>> {
	let file = File::open(path).with_context(|| format!("Failed opening '{}'", path.display()))?;
	Ok(BufReader::new(file))
}

/// Write Row
///
/// Print one row as `Row <n>:` followed by its tab-separated fields and a dashed separator.
fn write_row<W: Write>(output: &mut W, row_number: RowNumber, row: &Row) -> Result<()> {
	let fields: Vec<&str> = row.iter().collect();
	writeln!(output, "Row {}:\t{}", row_number, fields.join("\t|\t"))?;
	writeln!(output, "{}", "-".repeat(SEPARATOR_WIDTH))?;
	Ok(())
}

fn write_usage_hint<W: Write>(output: &mut W, path: &Path) -> Result<()> {
	writeln!(output, "[ERROR] File not found: {}", path.display())?;
	writeln!(output, "Please create a CSV file with the following format:")?;
	writeln!(output, "ID,Name,CGPA")?;
	writeln!(output, "1,Alice,8.5")?;
	writeln!(output, "2,Bob,7.8")?;
	Ok(())
}
