//! Top-level module for the HMM engine.
//!
//! Components, leaf-first:
//! - Probability tables and their loader (`ProbabilityTable`)
//! - The model itself and sequence generation (`Hmm`)
//! - The dynamic-programming grid shared by both evaluators (internal)
//! - Forward evaluation and Viterbi decoding (methods on `Hmm`)

/// Two-level probability tables, parsed from `from to probability` lines.
pub mod table;

/// Generated or decoded (states, observations) pairs.
pub mod sequence;

/// The HMM: fixed state order, dense matrices, weighted sampling.
pub mod hmm;

/// State × time matrices used by forward and viterbi.
///
/// Not exposed
mod trellis;

/// Forward algorithm.
pub mod forward;

/// Viterbi algorithm and terminal selection policy.
pub mod viterbi;

/// Parallel decoding of many sequences against one model.
pub mod batch;

#[cfg(test)]
pub(crate) mod fixtures {
	use std::path::Path;

	use super::hmm::Hmm;
	use super::table::ProbabilityTable;

	/// Parses an inline table, one triple per line.
	pub fn table(text: &str) -> ProbabilityTable {
		let lines: Vec<&str> = text.lines().collect();
		ProbabilityTable::parse(&lines, Path::new("inline")).unwrap()
	}

	/// Two-state fair/loaded coin.
	pub fn coin() -> Hmm {
		Hmm::new(
			table("# fair 0.5\n# loaded 0.5\nfair fair 0.9\nfair loaded 0.1\nloaded fair 0.2\nloaded loaded 0.8\n"),
			table("fair H 0.5\nfair T 0.5\nloaded H 0.8\nloaded T 0.2\n"),
		)
	}
}
