//! Top-level module for word frequency analysis and reconstruction.
//!
//! This module provides:
//! - Exclusion lists (`ExclusionSet`)
//! - Word counting (`FrequencyCounter`) into a `FrequencyTable`
//! - Structural measurements of a text (`ShapeStatistics`)
//! - Shape-preserving synthesis (`reconstructor`)
//! - A cached bundle of table and shape per document (`Analysis`)

/// Set of lowercased words skipped while counting.
///
/// Loaded from a newline-delimited list; an unreadable list degrades
/// to an empty set.
pub mod exclusion_set;

/// Word tokenization and counting.
///
/// Large inputs are split into line chunks counted in parallel.
pub mod frequency_counter;

/// Word to count mapping, ranked by frequency.
///
/// Persists to and reloads from the `word: count` line format.
pub mod frequency_table;

/// Length, punctuation, paragraph and line-break measurements of a text.
pub mod shape;

/// Randomized synthesis of a text from a frequency table and shape statistics.
pub mod reconstructor;

/// Table and shape of one document, with an optional binary cache.
pub mod analysis;
