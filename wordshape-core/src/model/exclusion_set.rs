use std::collections::HashSet;
use std::path::Path;

use log::{debug, warn};

use crate::error::Result;
use crate::io::read_lines;

/// Set of lowercased words omitted from frequency counting.
///
/// Built once from a newline-delimited list and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet {
	words: HashSet<String>,
}

impl ExclusionSet {
	/// Builds a set from raw lines.
	///
	/// Each line is trimmed and lowercased, blank lines are ignored.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let words = lines
			.into_iter()
			.map(|line| line.as_ref().trim().to_lowercase())
			.filter(|word| !word.is_empty())
			.collect();
		Self { words }
	}

	/// Loads a newline-delimited exclusion list.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let set = Self::from_lines(read_lines(&filepath)?);
		debug!("Loaded {} excluded words from {}", set.len(), filepath.as_ref().display());
		Ok(set)
	}

	/// Loads an exclusion list, degrading to an empty set when it is unreadable.
	pub fn load_or_empty<P: AsRef<Path>>(filepath: P) -> Self {
		match Self::load(&filepath) {
			Ok(set) => set,
			Err(e) => {
				warn!("Error reading excluded words file: {e}; counting every word");
				Self::default()
			}
		}
	}

	/// Returns `true` if `word` must not be counted.
	///
	/// `word` is expected to be lowercased already.
	pub fn contains(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Iterates over the excluded words in sorted order.
	pub(crate) fn sorted(&self) -> Vec<&str> {
		let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
		words.sort_unstable();
		words
	}
}
