use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Single character that is neither a word character nor whitespace.
static PUNCTUATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").expect("valid regex"));

/// Separator between paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Structural statistics of a source text.
///
/// Captures everything the reconstruction needs to mimic the original's
/// shape without keeping its content in order.
///
/// # Invariants
/// - `total_length` is measured in `char`s, the same unit used for truncation
/// - `punctuation` keeps duplicates, in order of appearance
/// - `paragraphs` always holds at least one segment
/// - `line_breaks` holds the `char` offset of every `'\n'`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShapeStatistics {
	total_length: usize,
	punctuation: Vec<char>,
	paragraphs: Vec<String>,
	line_breaks: Vec<usize>,
}

impl ShapeStatistics {
	/// Analyzes `text`.
	pub fn analyze(text: &str) -> Self {
		let punctuation = PUNCTUATION_RE
			.find_iter(text)
			.filter_map(|m| m.as_str().chars().next())
			.collect();

		let paragraphs = text.split(PARAGRAPH_SEPARATOR).map(str::to_owned).collect();

		let line_breaks = text
			.chars()
			.enumerate()
			.filter(|(_, c)| *c == '\n')
			.map(|(offset, _)| offset)
			.collect();

		Self { total_length: text.chars().count(), punctuation, paragraphs, line_breaks }
	}

	/// Length of the source text in `char`s.
	pub fn total_length(&self) -> usize {
		self.total_length
	}

	pub fn punctuation(&self) -> &[char] {
		&self.punctuation
	}

	pub fn paragraphs(&self) -> &[String] {
		&self.paragraphs
	}

	pub fn line_breaks(&self) -> &[usize] {
		&self.line_breaks
	}

	/// Number of paragraph markers a reconstruction should insert.
	pub fn paragraph_markers(&self) -> usize {
		self.paragraphs.len().saturating_sub(1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn scenario_single_line() {
		let shape = ShapeStatistics::analyze("cat dog. cat!");
		assert_eq!(shape.total_length(), 13);
		assert_eq!(shape.punctuation(), &['.', '!']);
		assert_eq!(shape.paragraphs(), &["cat dog. cat!".to_owned()]);
		assert_eq!(shape.paragraph_markers(), 0);
		assert!(shape.line_breaks().is_empty());
	}

	#[test]
	fn duplicates_and_order_are_kept() {
		let shape = ShapeStatistics::analyze("wait... what?! (yes)");
		assert_eq!(shape.punctuation(), &['.', '.', '.', '?', '!', '(', ')']);
	}

	#[test]
	fn combining_marks_count_as_punctuation() {
		let shape = ShapeStatistics::analyze("cafe\u{301} x\u{203f}y");
		assert_eq!(shape.punctuation(), &['\u{301}', '\u{203f}']);
	}

	#[test]
	fn paragraphs_and_line_breaks() {
		let shape = ShapeStatistics::analyze("one\ntwo\n\nthree\n\n\nfour");
		assert_eq!(shape.paragraphs().len(), 3);
		assert_eq!(shape.paragraph_markers(), 2);
		assert_eq!(shape.line_breaks(), &[3, 7, 8, 14, 15, 16]);
	}

	#[test]
	fn length_counts_chars_not_bytes() {
		let shape = ShapeStatistics::analyze("über\nçà");
		assert_eq!(shape.total_length(), 7);
		assert_eq!(shape.line_breaks(), &[4]);
		assert!(shape.punctuation().is_empty());
	}

	#[test]
	fn empty_text_has_one_segment() {
		let shape = ShapeStatistics::analyze("");
		assert_eq!(shape.total_length(), 0);
		assert_eq!(shape.paragraphs().len(), 1);
		assert_eq!(shape.paragraph_markers(), 0);
	}
}
