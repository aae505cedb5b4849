use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::frequency_counter::is_word;
use crate::error::{Error, Result};
use crate::io::{read_text, write_text};

/// Separator between a word and its count in the persisted form.
pub const ENTRY_SEPARATOR: &str = ": ";

/// Mapping from a lowercased word to its number of occurrences.
///
/// # Responsibilities
/// - Accumulate occurrences while counting
/// - Rank words by descending frequency for display and persistence
/// - Persist to and reload from the `word: count` line format
/// - Merge with another table (parallel counting)
///
/// # Invariants
/// - Every stored count is strictly positive
/// - Keys are the exact tokens produced by the counter (no whitespace, no punctuation)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	counts: HashMap<String, usize>,
}

impl FrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `word`.
	pub(crate) fn add(&mut self, word: &str) {
		if let Some(count) = self.counts.get_mut(word) {
			*count += 1;
		} else {
			self.counts.insert(word.to_owned(), 1);
		}
	}

	/// Returns the count of `word`, or 0 if it was never seen.
	pub fn get(&self, word: &str) -> usize {
		self.counts.get(word).copied().unwrap_or(0)
	}

	/// Number of distinct words.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Sum of all counts, i.e. the size of the word pool.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Iterates over `(word, count)` pairs in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(word, count)| (word.as_str(), *count))
	}

	/// Returns all entries ranked by descending count.
	///
	/// Ties are broken by ascending word so the order is deterministic.
	pub fn ranked(&self) -> Vec<(&str, usize)> {
		let mut entries: Vec<(&str, usize)> = self.iter().collect();
		entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
		entries
	}

	/// Merges another table into this one, summing counts.
	pub fn merge(&mut self, other: &Self) {
		for (word, count) in &other.counts {
			*self.counts.entry(word.clone()).or_insert(0) += *count;
		}
	}

	/// Serializes the table as one `word: count` line per entry, most frequent first.
	pub fn to_text(&self) -> String {
		let mut text = String::new();
		for (word, count) in self.ranked() {
			// Writing into a String cannot fail
			let _ = writeln!(text, "{word}{ENTRY_SEPARATOR}{count}");
		}
		text
	}

	/// Parses the `word: count` line format.
	///
	/// # Notes
	/// - Lines are trimmed before parsing.
	/// - The word ends at the first `": "`.
	/// - A repeated word keeps the last count read.
	///
	/// # Errors
	/// Returns `Error::MalformedEntry` for the first line that is blank, has no
	/// separator, has a word that is not a run of word characters, or has a
	/// count that is not a positive integer.
	pub fn parse(text: &str) -> Result<Self> {
		let mut counts = HashMap::new();

		for (index, raw) in text.lines().enumerate() {
			let line = raw.trim();
			let malformed = || Error::MalformedEntry { line_number: index + 1, line: raw.to_owned() };

			let (word, count) = line.split_once(ENTRY_SEPARATOR).ok_or_else(malformed)?;
			if !is_word(word) {
				return Err(malformed());
			}
			let count: usize = count.trim().parse().map_err(|_| malformed())?;
			if count == 0 {
				return Err(malformed());
			}

			counts.insert(word.to_owned(), count);
		}

		Ok(Self { counts })
	}

	/// Reloads a table persisted with [`FrequencyTable::save`].
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let table = Self::parse(&read_text(&filepath)?)?;
		debug!("Loaded {} distinct words from {}", table.len(), filepath.as_ref().display());
		Ok(table)
	}

	/// Persists the table in the `word: count` line format.
	pub fn save<P: AsRef<Path>>(&self, filepath: P) -> Result<()> {
		write_text(&filepath, &self.to_text())?;
		debug!("Wrote {} distinct words to {}", self.len(), filepath.as_ref().display());
		Ok(())
	}
}

impl<S: AsRef<str>> FromIterator<(S, usize)> for FrequencyTable {
	/// Builds a table from `(word, count)` pairs, summing repeated words and
	/// dropping zero counts.
	fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
		let mut counts = HashMap::new();
		for (word, count) in iter {
			if count > 0 {
				*counts.entry(word.as_ref().to_owned()).or_insert(0) += count;
			}
		}
		Self { counts }
	}
}
