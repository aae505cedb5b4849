use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::error::{Error, Result};

/// Extensions accepted as plain-text documents.
const PLAIN_TEXT_EXTENSIONS: [&str; 3] = ["txt", "text", "md"];

/// Reads a whole UTF-8 text file into memory.
pub fn read_text<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| Error::io(path, e))?;
	Ok(contents)
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	Ok(read_text(filename)?.lines().map(str::to_owned).collect())
}

/// Writes `contents` to `filename`, replacing any existing file.
pub fn write_text<P: AsRef<Path>>(filename: P, contents: &str) -> Result<()> {
	let path = filename.as_ref();
	File::create(path)
		.and_then(|mut file| file.write_all(contents.as_bytes()))
		.map_err(|e| Error::io(path, e))
}

/// Writes raw bytes to `filename`, replacing any existing file.
pub(crate) fn write_bytes<P: AsRef<Path>>(filename: P, bytes: &[u8]) -> Result<()> {
	let path = filename.as_ref();
	fs::write(path, bytes).map_err(|e| Error::io(path, e))
}

/// Reads raw bytes from `filename`.
pub(crate) fn read_bytes<P: AsRef<Path>>(filename: P) -> Result<Vec<u8>> {
	let path = filename.as_ref();
	fs::read(path).map_err(|e| Error::io(path, e))
}

/// Rejects documents whose extension is not a plain-text one.
///
/// PDF and EPUB extraction is left to external tools.
pub fn ensure_plain_text<P: AsRef<Path>>(input_path: P) -> Result<()> {
	let path = input_path.as_ref();
	let extension = path
		.extension()
		.map(|e| e.to_string_lossy().to_lowercase())
		.unwrap_or_default();

	if PLAIN_TEXT_EXTENSIONS.contains(&extension.as_str()) {
		Ok(())
	} else {
		Err(Error::UnsupportedFileType(path.display().to_string()))
	}
}

/// Builds an output path from an input document, an output folder and a suffix.
///
/// Example:
/// `books/moby.txt` + `"out"` + `"word_count"` + `"txt"` → `out/moby_word_count.txt`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_folder: &str,
	suffix: &str,
	output_extension: &str,
) -> Result<PathBuf> {
	let stem = get_filename(&input_path)?;

	let mut output = normalize_folder(output_folder);
	output.push(format!("{stem}_{suffix}"));
	output.set_extension(output_extension);

	Ok(output)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/moby.txt"` → `"moby"`
/// - `"moby.txt"` → `"moby"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> Result<String> {
	let path = input_path.as_ref();
	let stem = path.file_stem().ok_or_else(|| {
		Error::io(
			path,
			std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no filename"),
		)
	})?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `""`, `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input.is_empty() || input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_uses_stem_and_suffix() {
		let path = build_output_path("books/moby.txt", "out", "word_count", "txt").unwrap();
		assert_eq!(path, PathBuf::from("out/moby_word_count.txt"));
	}

	#[test]
	fn output_path_defaults_to_current_dir() {
		let path = build_output_path("moby.txt", ".", "reconstructed", "txt").unwrap();
		assert_eq!(path.file_name().unwrap(), "moby_reconstructed.txt");
		assert_eq!(path.parent().unwrap(), env::current_dir().unwrap());
	}

	#[test]
	fn rejects_non_text_documents() {
		assert!(ensure_plain_text("book.txt").is_ok());
		assert!(ensure_plain_text("NOTES.MD").is_ok());
		assert!(matches!(ensure_plain_text("book.pdf"), Err(Error::UnsupportedFileType(_))));
		assert!(matches!(ensure_plain_text("book"), Err(Error::UnsupportedFileType(_))));
	}

	#[test]
	fn text_round_trips_through_disk() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("doc.txt");
		write_text(&path, "one\r\ntwo\n").unwrap();
		assert_eq!(read_text(&path).unwrap(), "one\r\ntwo\n");
		assert_eq!(read_lines(&path).unwrap(), vec!["one", "two"]);
	}

	#[test]
	fn missing_file_reports_path() {
		let err = read_text("definitely/not/here.txt").unwrap_err();
		assert!(err.to_string().contains("here.txt"));
	}
}
