use crate::model::exclusion_set::ExclusionSet;
use crate::model::frequency_counter::{FrequencyCounter, count_words, tokenize};
use crate::model::frequency_table::FrequencyTable;
use crate::model::reconstructor::{
	ReconstructionInput, Token, Truncation, build_tokens, join_tokens, reconstruct,
};
use crate::model::shape::ShapeStatistics;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use regex::Regex;
use std::collections::HashMap;

/// Prose-like text: words, punctuation, spaces and line breaks.
fn prose() -> impl Strategy<Value = String> {
	"[a-zA-Z0-9_éÜ .,;!?'()\n-]{0,300}"
}

/// Small word lists so exclusions actually hit.
fn exclusions() -> impl Strategy<Value = ExclusionSet> {
	prop::collection::vec("[a-e]{1,2}", 0..6).prop_map(ExclusionSet::from_lines)
}

/// Tables with word-like keys and positive counts.
fn table() -> impl Strategy<Value = FrequencyTable> {
	prop::collection::hash_map("[a-z0-9_]{1,8}", 1usize..6, 0..12)
		.prop_map(|entries| entries.into_iter().collect())
}

fn word_multiset<'a>(tokens: &[Token<'a>]) -> HashMap<&'a str, usize> {
	let mut counts = HashMap::new();
	for token in tokens {
		if let Token::Word(word) = token {
			*counts.entry(*word).or_insert(0) += 1;
		}
	}
	counts
}

proptest! {
	/// The sum of counts equals the number of non-excluded word tokens.
	#[test]
	fn prop_total_matches_token_count(text in prose(), excluded in exclusions()) {
		let table = count_words(&text, &excluded);
		let expected = tokenize(&text).iter().filter(|w| !excluded.contains(w)).count();
		prop_assert_eq!(table.total(), expected);
	}

	/// Counted words hold no whitespace and no punctuation.
	#[test]
	fn prop_words_are_word_characters(text in any::<String>()) {
		let word_re = Regex::new(r"^[\p{L}\p{N}_]+$").unwrap();
		let table = count_words(&text, &ExclusionSet::default());
		for (word, count) in table.iter() {
			prop_assert!(word_re.is_match(word), "bad word {:?}", word);
			prop_assert!(count > 0);
		}
	}

	/// Parallel and sequential counting agree.
	#[test]
	fn prop_parallel_count_is_sequential_count(text in prose(), excluded in exclusions()) {
		let sequential = FrequencyCounter::new(excluded.clone()).with_parallel_threshold(0).count(&text);
		let parallel = FrequencyCounter::new(excluded).with_parallel_threshold(1).count(&text);
		prop_assert_eq!(parallel, sequential);
	}

	/// Persisting and reloading a table gives the same mapping.
	#[test]
	fn prop_table_text_round_trip(text in any::<String>()) {
		let table = count_words(&text, &ExclusionSet::default());
		let reloaded = FrequencyTable::parse(&table.to_text()).unwrap();
		prop_assert_eq!(reloaded, table);
	}

	/// The reconstructed word pool is exactly the table's multiset.
	#[test]
	fn prop_word_pool_matches_table(table in table(), source in prose(), seed in any::<u64>()) {
		let shape = ShapeStatistics::analyze(&source);
		let tokens = build_tokens(&table, &shape, &mut StdRng::seed_from_u64(seed));

		let expected: HashMap<&str, usize> = table.iter().collect();
		prop_assert_eq!(word_multiset(&tokens), expected);
	}

	/// Punctuation and marker counts follow the shape.
	#[test]
	fn prop_marker_counts(table in table(), source in prose(), seed in any::<u64>()) {
		let shape = ShapeStatistics::analyze(&source);
		let tokens = build_tokens(&table, &shape, &mut StdRng::seed_from_u64(seed));

		let punctuation = tokens.iter().filter(|t| matches!(t, Token::Punctuation(_))).count();
		let line_breaks = tokens.iter().filter(|t| **t == Token::LineBreak).count();
		let paragraphs = tokens.iter().filter(|t| **t == Token::Paragraph).count();
		prop_assert_eq!(punctuation, shape.punctuation().len());

		if table.total() + shape.punctuation().len() >= 2 {
			prop_assert_eq!(line_breaks, shape.line_breaks().len());
			prop_assert_eq!(paragraphs, shape.paragraph_markers());
			prop_assert!(!matches!(tokens[0], Token::LineBreak | Token::Paragraph));
		} else {
			prop_assert_eq!(line_breaks, 0);
			prop_assert_eq!(paragraphs, 0);
		}
	}

	/// The output never exceeds the source length and is a prefix of the full text.
	#[test]
	fn prop_length_bound(table in table(), source in prose(), seed in any::<u64>(), boundary in any::<bool>()) {
		let shape = ShapeStatistics::analyze(&source);
		let input = ReconstructionInput {
			truncation: if boundary { Truncation::TokenBoundary } else { Truncation::Hard },
		};

		let full = join_tokens(&build_tokens(&table, &shape, &mut StdRng::seed_from_u64(seed)));
		let out = reconstruct(&table, &shape, &input, &mut StdRng::seed_from_u64(seed));

		prop_assert!(out.chars().count() <= shape.total_length());
		prop_assert!(full.starts_with(&out));
		if !boundary {
			prop_assert_eq!(out.chars().count(), full.chars().count().min(shape.total_length()));
		}
	}
}
