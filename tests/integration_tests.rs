use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use csv_reader::process;
use csv_reader::types::Config;

fn config(path: &str, search_term: Option<&str>) -> Config {
	Config {
		path: PathBuf::from(path),
		search_term: search_term.map(str::to_owned),
		..Config::default()
	}
}

fn run(config: &Config) -> Result<String> {
	let mut output = Vec::new();
	process::run(config, &mut output)?;
	Ok(String::from_utf8(output)?)
}

fn row_lines(output: &str) -> Vec<&str> {
	output.lines().filter(|l| l.starts_with("Row ")).collect()
}

#[test]
fn reads_all_rows_then_accesses_cell() -> Result<()> {
	let output = run(&config("tests/data/students.csv", None))?;

	assert!(output.starts_with(&format!(
		"\n{0}\nReading CSV File: tests/data/students.csv\n{0}\n",
		"=".repeat(80)
	)));
	assert_eq!(
		row_lines(&output),
		vec![
			"Row 1:\tID\t|\tName\t|\tCGPA",
			"Row 2:\t1\t|\tAlice\t|\t8.5",
			"Row 3:\t2\t|\tBob\t|\t7.8",
			"Row 4:\t3\t|\tCarol\t|\t9.1",
		]
	);
	assert_eq!(output.matches(&"-".repeat(80)).count(), 4);
	assert!(output.contains("\n[SUCCESS] Total rows read: 4\n"));
	assert!(output.ends_with(
		"\n--- Accessing Specific Cell (Row 2, Column 1) ---\nValue at Row 2, Column 1: Alice\n"
	));
	Ok(())
}

#[test]
fn searches_when_term_given() -> Result<()> {
	let output = run(&config("tests/data/students.csv", Some("bob")))?;
	assert!(output.ends_with("\n--- Searching for: bob ---\nFound in Row 3: 2,Bob,7.8\n"));

	let output = run(&config("tests/data/students.csv", Some("dave")))?;
	assert!(output.ends_with("\n--- Searching for: dave ---\nNot found.\n"));
	assert!(!output.contains("Found in Row"));
	Ok(())
}

#[test]
fn short_file_gives_no_cell_value() -> Result<()> {
	let output = run(&config("tests/data/header-only.csv", None))?;
	assert!(output.contains("Total rows read: 1"));
	assert!(output.ends_with("--- Accessing Specific Cell (Row 2, Column 1) ---\n"));
	assert!(!output.contains("Value at Row"));
	Ok(())
}

#[test]
fn narrow_row_gives_no_cell_value() -> Result<()> {
	let output = run(&config("tests/data/single-column.csv", None))?;
	assert!(output.contains("Total rows read: 2"));
	assert!(!output.contains("Value at Row"));
	Ok(())
}

#[test]
fn missing_file_is_not_an_error() -> Result<()> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("sample_data.csv");
	let config = Config {
		path: path.clone(),
		search_term: Some("bob".to_string()),
		..Config::default()
	};
	let output = run(&config)?;
	assert_eq!(
		output,
		format!(
			"[ERROR] File not found: {}\nPlease create a CSV file with the following format:\nID,Name,CGPA\n1,Alice,8.5\n2,Bob,7.8\n",
			path.display()
		)
	);
	Ok(())
}

#[test]
fn read_failure_propagates_after_banner() -> Result<()> {
	// Opening a directory succeeds, reading from it does not
	let dir = tempfile::tempdir()?;
	let config = Config {
		path: dir.path().to_path_buf(),
		..Config::default()
	};
	let mut output = Vec::new();
	let err = process::run(&config, &mut output).unwrap_err();
	let output = String::from_utf8(output)?;
	assert!(output.contains("Reading CSV File: "));
	assert!(row_lines(&output).is_empty());
	assert!(!output.contains("Total rows read"));
	assert!(!output.contains("Accessing Specific Cell"));

	let mut report = Vec::new();
	process::report_failure(&err, &mut report)?;
	let report = String::from_utf8(report)?;
	assert!(report.starts_with("Error reading file: Failed reading "));
	assert!(report.contains("\n1. Create an Excel file\n"));
	Ok(())
}

#[test]
fn latin1_rows_pass_through() -> Result<()> {
	let mut file = tempfile::NamedTempFile::new()?;
	file.write_all(b"ID,Name,CGPA\n1,Jos\xe9,8.5\n2,Bob,7.8\n")?;
	file.flush()?;

	let config = Config {
		path: file.path().to_path_buf(),
		search_term: Some("bob".to_string()),
		..Config::default()
	};
	let output = run(&config)?;
	assert_eq!(
		row_lines(&output),
		vec![
			"Row 1:\tID\t|\tName\t|\tCGPA",
			"Row 2:\t1\t|\tJos\u{fffd}\t|\t8.5",
			"Row 3:\t2\t|\tBob\t|\t7.8",
		]
	);
	assert!(output.contains("Total rows read: 3"));
	assert!(output.contains("Value at Row 2, Column 1: Jos\u{fffd}\n"));
	assert!(output.ends_with("Found in Row 3: 2,Bob,7.8\n"));
	Ok(())
}

#[test]
fn trailing_comma_row_gives_no_cell_value() -> Result<()> {
	let output = run(&config("tests/data/trailing-comma.csv", None))?;
	assert_eq!(row_lines(&output), vec!["Row 1:\tID", "Row 2:\t1"]);
	assert!(output.contains("Total rows read: 2"));
	assert!(!output.contains("Value at Row"));
	Ok(())
}
