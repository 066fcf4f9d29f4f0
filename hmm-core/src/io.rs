use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{HmmError, Result};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - A file that does not exist is reported as `MissingResource`
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let mut contents = String::new();
	open(path)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

fn open(path: &Path) -> Result<File> {
	File::open(path).map_err(|e| match e.kind() {
		io::ErrorKind::NotFound => HmmError::MissingResource { path: path.to_path_buf() },
		_ => HmmError::Io(e),
	})
}

/// Builds a sidecar resource path by appending an extension to a basename.
///
/// The extension is appended, not substituted, so dotted basenames survive:
/// `data/cat` + `"trans"` → `data/cat.trans`,
/// `data/pos.trained` + `"emit"` → `data/pos.trained.emit`
pub fn resource_path<P: AsRef<Path>>(basename: P, extension: &str) -> PathBuf {
	let mut path: OsString = basename.as_ref().as_os_str().to_owned();
	path.push(".");
	path.push(extension);
	PathBuf::from(path)
}

/// Splits observation text into symbols.
///
/// Tokens are separated by spaces or newlines. Empty tokens and literal
/// `\n` tokens are dropped.
pub fn tokenize_observations(text: &str) -> Vec<String> {
	text.split_whitespace()
		.filter(|token| *token != "\\n")
		.map(str::to_owned)
		.collect()
}

/// Reads an observation sequence from a file.
pub fn read_observations<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let lines = read_file(filename)?;
	Ok(lines.iter().flat_map(|line| tokenize_observations(line)).collect())
}

/// Writes an observation sequence as a single space-separated line.
pub fn write_observations<P, S>(filename: P, outputs: &[S]) -> Result<()>
where
	P: AsRef<Path>,
	S: AsRef<str>,
{
	let mut line = outputs.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
	line.push('\n');
	fs::write(filename, line)?;
	Ok(())
}
