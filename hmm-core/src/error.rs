//! Error types for model loading, generation and inference.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for all HMM operations.
#[derive(Debug, Error)]
pub enum HmmError {
	/// A required `.trans` / `.emit` (or observation) file does not exist.
	#[error("missing resource: {}", path.display())]
	MissingResource { path: PathBuf },

	/// I/O error other than a missing resource.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// A table line that cannot be turned into a `(from, to, probability)` triple.
	#[error("parse error in {}:{line}: {message}", path.display())]
	Parse {
		path: PathBuf,
		line: usize,
		message: String,
	},

	/// Sampling was requested from a row that is absent or carries no weight.
	#[error("no {table} distribution to sample from for state '{state}'")]
	EmptyDistribution { state: String, table: &'static str },

	/// Every cell of the final trellis column is zero.
	#[error("no state path can produce the observation sequence")]
	NoViablePath,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmmError>;
