use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::info;

/// Reads a text file and returns its records, one per line.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Trims each line and skips blank ones
pub fn read_records<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(&filename)?.read_to_string(&mut contents)?;
	let records: Vec<String> = contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect();
	info!("Loaded {} records from {}", records.len(), filename.as_ref().display());
	Ok(records)
}

/// Joins records into a single corpus, separated by one space.
///
/// Example:
/// `["Hello there.", "Hi."]` → `"Hello there. Hi."`
pub fn join_records<I, S>(records: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut corpus = String::new();
	for record in records {
		if !corpus.is_empty() {
			corpus.push(' ');
		}
		corpus.push_str(record.as_ref());
	}
	corpus
}
