//! Error types for word counting, persistence and reconstruction.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate's `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, analyzing or persisting documents.
#[derive(Error, Debug)]
pub enum Error {
	/// A file could not be read or written.
	#[error("I/O error on {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A persisted frequency table contains a line that is not `word: count`.
	///
	/// The whole load is rejected, no partial table is returned.
	#[error("Malformed frequency entry at line {line_number}: {line:?}")]
	MalformedEntry { line_number: usize, line: String },

	/// The input document is not plain text.
	#[error("Unsupported file type: {0}")]
	UnsupportedFileType(String),

	/// The binary analysis cache could not be encoded or decoded.
	#[error("Analysis cache error: {0}")]
	Cache(#[from] postcard::Error),
}

impl Error {
	pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}
