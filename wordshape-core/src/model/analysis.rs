use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::exclusion_set::ExclusionSet;
use super::frequency_counter::FrequencyCounter;
use super::frequency_table::FrequencyTable;
use super::reconstructor::{ReconstructionInput, reconstruct};
use super::shape::ShapeStatistics;
use crate::error::Result;
use crate::io::{read_bytes, write_bytes};

/// Frequency table and shape statistics of one document.
///
/// An analysis can be cached on disk with `postcard`. The cache stores a
/// fingerprint of the source text and exclusion set and is only reused when
/// both are unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
	fingerprint: u64,
	table: FrequencyTable,
	shape: ShapeStatistics,
}

impl Analysis {
	/// Counts words and measures the shape of `text`.
	pub fn new(text: &str, counter: &FrequencyCounter) -> Self {
		Self {
			fingerprint: fingerprint(text, counter.exclusions()),
			table: counter.count(text),
			shape: ShapeStatistics::analyze(text),
		}
	}

	/// Loads the analysis from `cache_path` if it matches `text`, otherwise
	/// computes it and refreshes the cache.
	///
	/// # Notes
	/// - An unreadable or stale cache is recomputed, never fatal.
	/// - A failure to write the cache is logged; the analysis is still returned.
	pub fn load_or_compute<P: AsRef<Path>>(text: &str, counter: &FrequencyCounter, cache_path: P) -> Self {
		let path = cache_path.as_ref();
		let expected = fingerprint(text, counter.exclusions());

		if path.exists() {
			match Self::read_cache(path) {
				Ok(analysis) if analysis.fingerprint == expected => {
					debug!("Reusing analysis cache {}", path.display());
					return analysis;
				}
				Ok(_) => debug!("Analysis cache {} is stale", path.display()),
				Err(e) => warn!("Ignoring unreadable analysis cache: {e}"),
			}
		}

		let analysis = Self::new(text, counter);
		if let Err(e) = analysis.save_cache(path) {
			warn!("Could not write analysis cache: {e}");
		}
		analysis
	}

	/// Decodes a cached analysis.
	pub fn read_cache<P: AsRef<Path>>(cache_path: P) -> Result<Self> {
		let bytes = read_bytes(cache_path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	/// Encodes the analysis to `cache_path`.
	pub fn save_cache<P: AsRef<Path>>(&self, cache_path: P) -> Result<()> {
		let bytes = postcard::to_stdvec(self)?;
		write_bytes(cache_path, &bytes)
	}

	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	pub fn shape(&self) -> &ShapeStatistics {
		&self.shape
	}

	/// Synthesizes a text from this document's own table and shape.
	pub fn reconstruct<R: Rng + ?Sized>(&self, input: &ReconstructionInput, rng: &mut R) -> String {
		reconstruct(&self.table, &self.shape, input, rng)
	}
}

/// Hashes the source text together with the sorted exclusion list.
///
/// `DefaultHasher` output may change between toolchains; a mismatch only
/// causes a recount.
fn fingerprint(text: &str, exclusions: &ExclusionSet) -> u64 {
	let mut hasher = DefaultHasher::new();
	text.hash(&mut hasher);
	exclusions.sorted().hash(&mut hasher);
	hasher.finish()
}
