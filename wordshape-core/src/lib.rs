//! Word frequency analysis and shape-preserving text reconstruction.
//!
//! This crate provides:
//! - Case-insensitive word counting with stopword exclusion
//! - Structural statistics of a text (length, punctuation, paragraphs, line breaks)
//! - Synthesis of a new text with the same word multiset and the same shape
//! - Persistence of frequency tables and cached analyses
//!
//! Extracting text from PDF or EPUB containers is left to external tools;
//! the core only works on `&str`.

/// Error type shared by every fallible operation.
pub mod error;

/// Core counting, analysis and reconstruction logic.
pub mod model;

/// I/O utilities (text files, output paths).
pub mod io;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
