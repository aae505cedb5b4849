use std::fmt;
use std::fmt::Write as _;

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::frequency_table::FrequencyTable;
use super::shape::{PARAGRAPH_SEPARATOR, ShapeStatistics};

/// Marker inserted for every line break of the source.
pub const LINE_BREAK_MARKER: &str = "\n";

/// Marker inserted between reconstructed paragraphs.
pub const PARAGRAPH_MARKER: &str = PARAGRAPH_SEPARATOR;

/// A single element of a reconstructed text.
///
/// Tokens are joined with single spaces once every insertion is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
	Word(&'a str),
	Punctuation(char),
	LineBreak,
	Paragraph,
}

impl fmt::Display for Token<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Word(word) => f.write_str(word),
			Token::Punctuation(c) => write!(f, "{c}"),
			Token::LineBreak => f.write_str(LINE_BREAK_MARKER),
			Token::Paragraph => f.write_str(PARAGRAPH_MARKER),
		}
	}
}

/// Where `insert_at_random` may put a new item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
	/// Any index in `0..=len`.
	Anywhere,
	/// Any index in `1..=len - 1`, i.e. strictly after the first item.
	/// Sequences shorter than 2 are left unchanged.
	BetweenTokens,
}

/// How the joined text is cut down to the source length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Truncation {
	/// Cut at exactly the source length, possibly inside a word or marker.
	#[default]
	Hard,
	/// Cut at the last space at or before the source length.
	/// Falls back to a hard cut when the prefix holds no space.
	TokenBoundary,
}

impl Truncation {
	/// Shortens `text` to at most `max_chars` characters.
	pub fn apply(self, mut text: String, max_chars: usize) -> String {
		let Some((cut, next)) = text.char_indices().nth(max_chars) else {
			return text;
		};

		match self {
			Truncation::Hard => text.truncate(cut),
			Truncation::TokenBoundary => {
				let end = if next == ' ' { cut } else { text[..cut].rfind(' ').unwrap_or(cut) };
				text.truncate(end);
			}
		}
		text
	}
}

/// Settings of a reconstruction.
///
/// The random source is passed separately so callers can seed it.
#[derive(Clone, Debug, Default)]
pub struct ReconstructionInput {
	pub truncation: Truncation,
}

/// Inserts `item` at a uniformly random index allowed by `placement`.
///
/// The valid range is computed from the current length of `sequence`.
pub fn insert_at_random<T, R: Rng + ?Sized>(mut sequence: Vec<T>, item: T, placement: Placement, rng: &mut R) -> Vec<T> {
	let len = sequence.len();
	let index = match placement {
		Placement::Anywhere => rng.random_range(0..=len),
		Placement::BetweenTokens if len >= 2 => rng.random_range(1..len),
		Placement::BetweenTokens => return sequence,
	};
	sequence.insert(index, item);
	sequence
}

/// Builds the full token sequence of a reconstruction, before joining and truncation.
///
/// # Behavior
/// - Repeats every word `count` times and shuffles the pool.
/// - Inserts each punctuation character anywhere in the pool.
/// - Inserts one line-break marker per source line break, never at position 0.
/// - Inserts `paragraphs - 1` paragraph markers the same way.
///
/// # Notes
/// - The pool is seeded from the ranked table so a seeded `rng` gives a
///   reproducible result regardless of hash map ordering.
pub fn build_tokens<'a, R: Rng + ?Sized>(table: &'a FrequencyTable, shape: &ShapeStatistics, rng: &mut R) -> Vec<Token<'a>> {
	let mut tokens: Vec<Token<'a>> = Vec::with_capacity(
		table.total() + shape.punctuation().len() + shape.line_breaks().len() + shape.paragraph_markers(),
	);
	for (word, count) in table.ranked() {
		tokens.extend(std::iter::repeat_n(Token::Word(word), count));
	}
	tokens.shuffle(rng);

	for &mark in shape.punctuation() {
		tokens = insert_at_random(tokens, Token::Punctuation(mark), Placement::Anywhere, rng);
	}

	for _ in shape.line_breaks() {
		tokens = insert_at_random(tokens, Token::LineBreak, Placement::BetweenTokens, rng);
	}

	for _ in 0..shape.paragraph_markers() {
		tokens = insert_at_random(tokens, Token::Paragraph, Placement::BetweenTokens, rng);
	}

	tokens
}

/// Joins tokens with single spaces.
pub fn join_tokens(tokens: &[Token<'_>]) -> String {
	let mut text = String::new();
	for (i, token) in tokens.iter().enumerate() {
		if i > 0 {
			text.push(' ');
		}
		// Writing into a String cannot fail
		let _ = write!(text, "{token}");
	}
	text
}

/// Synthesizes a text with the word multiset of `table` and the shape of `shape`.
///
/// The result is never longer than `shape.total_length()` characters.
pub fn reconstruct<R: Rng + ?Sized>(
	table: &FrequencyTable,
	shape: &ShapeStatistics,
	input: &ReconstructionInput,
	rng: &mut R,
) -> String {
	let tokens = build_tokens(table, shape, rng);
	let text = join_tokens(&tokens);
	let full_length = text.chars().count();
	let text = input.truncation.apply(text, shape.total_length());
	debug!(
		"Reconstructed {} tokens into {} chars (before truncation {full_length})",
		tokens.len(),
		text.chars().count()
	);
	text
}
