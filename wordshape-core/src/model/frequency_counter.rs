use std::sync::mpsc;
use std::sync::LazyLock;
use std::thread;

use log::debug;
use regex::Regex;

use super::exclusion_set::ExclusionSet;
use super::frequency_table::FrequencyTable;

/// Maximal run of word characters (letters, digits, underscore).
///
/// Combining marks and connector punctuation other than `_` are not word characters.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("valid regex"));

/// A whole string made of word characters.
static WHOLE_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}_]+$").expect("valid regex"));

/// Inputs with fewer lines than this are counted on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Returns `true` if `candidate` is a single non-empty run of word characters.
pub fn is_word(candidate: &str) -> bool {
	WHOLE_WORD_RE.is_match(candidate)
}

/// Lowercases `text` and returns its word tokens in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
	let lowered = text.to_lowercase();
	WORD_RE.find_iter(&lowered).map(|m| m.as_str().to_owned()).collect()
}

/// Counts word occurrences in a text, skipping excluded words.
///
/// # Responsibilities
/// - Lowercase and tokenize the text into word-character runs
/// - Filter tokens through the `ExclusionSet`
/// - Split large inputs into line chunks counted on worker threads
///
/// # Notes
/// - A word never spans a newline, so chunking on lines gives the same
///   table as a sequential count.
#[derive(Clone, Debug)]
pub struct FrequencyCounter {
	exclusions: ExclusionSet,
	parallel_threshold: usize,
}

impl FrequencyCounter {
	pub fn new(exclusions: ExclusionSet) -> Self {
		Self { exclusions, parallel_threshold: DEFAULT_PARALLEL_THRESHOLD }
	}

	/// Sets the number of lines from which counting is spread across threads.
	///
	/// `0` disables parallel counting.
	pub fn with_parallel_threshold(mut self, lines: usize) -> Self {
		self.parallel_threshold = lines;
		self
	}

	pub fn exclusions(&self) -> &ExclusionSet {
		&self.exclusions
	}

	/// Produces the frequency table of `text`.
	///
	/// An empty text yields an empty table.
	pub fn count(&self, text: &str) -> FrequencyTable {
		let lines: Vec<&str> = text.lines().collect();
		if self.parallel_threshold == 0 || lines.len() < self.parallel_threshold {
			return self.count_chunk(text);
		}
		self.count_parallel(&lines)
	}

	/// Counts a single piece of text on the calling thread.
	fn count_chunk(&self, text: &str) -> FrequencyTable {
		let lowered = text.to_lowercase();
		let mut table = FrequencyTable::new();
		for token in WORD_RE.find_iter(&lowered) {
			let word = token.as_str();
			if !self.exclusions.contains(word) {
				table.add(word);
			}
		}
		table
	}

	/// Splits the lines into chunks (based on CPU cores * factor), counts each
	/// chunk on its own thread and merges the partial tables.
	fn count_parallel(&self, lines: &[&str]) -> FrequencyTable {
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks).max(1);
		debug!("Counting {} lines in chunks of {chunk_size}", lines.len());

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in lines.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					let partial = self.count_chunk(&chunk.join("\n"));
					// The receiver outlives the scope
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		let mut table = FrequencyTable::new();
		for partial in rx.iter() {
			table.merge(&partial);
		}
		table
	}
}

/// Counts `text` with the given exclusions using default settings.
pub fn count_words(text: &str, exclusions: &ExclusionSet) -> FrequencyTable {
	FrequencyCounter::new(exclusions.clone()).count(text)
}
