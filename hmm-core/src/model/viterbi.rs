use serde::{Deserialize, Serialize};

use super::hmm::Hmm;
use super::trellis::{Backpointers, START_ROW, Trellis};
use crate::error::{HmmError, Result};

/// Rule choosing the final-column row from which backtracking starts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TerminalSelection {
	/// Among rows whose last backpointer is set, the one with the smallest
	/// backpointer (first row in state order on ties).
	#[default]
	SmallestBackpointer,
	/// The row with the highest final probability (first row on ties).
	MaxProbability,
}

impl Hmm {
	/// Fills the max-product trellis and its backpointers.
	///
	/// A backpointer is only replaced by a strictly larger candidate, so ties
	/// keep the earliest predecessor and zero candidates never set one.
	fn viterbi_trellis<S: AsRef<str>>(&self, observations: &[S]) -> (Trellis, Backpointers) {
		let symbols = self.observation_indices(observations);
		let mut trellis = Trellis::seeded(self.n_states(), symbols.len());
		let mut backpointers = Backpointers::new(self.n_states(), symbols.len(), None);

		for (t, &symbol) in symbols.iter().enumerate() {
			let column = t + 1;
			for state in 0..self.n_states() {
				let mut best = 0.0;
				let mut best_from = None;
				for from in 0..trellis.rows() {
					let candidate = trellis.get(from, column - 1) * self.step_weight(from, state, symbol);
					if candidate > best {
						best = candidate;
						best_from = Some(from);
					}
				}
				trellis.set(state + 1, column, best);
				backpointers.set(state + 1, column, best_from);
			}
		}

		(trellis, backpointers)
	}

	/// Most probable hidden-state path for the observations, using the
	/// default `TerminalSelection`.
	pub fn viterbi<S: AsRef<str>>(&self, observations: &[S]) -> Result<Vec<&str>> {
		self.viterbi_with(observations, TerminalSelection::default())
	}

	/// Most probable hidden-state path for the observations.
	///
	/// # Returns
	/// - One state label per observation, in order
	/// - An empty path for an empty observation sequence
	///
	/// # Errors
	/// `NoViablePath` if every final trellis cell is zero.
	pub fn viterbi_with<S: AsRef<str>>(
		&self,
		observations: &[S],
		selection: TerminalSelection,
	) -> Result<Vec<&str>> {
		if observations.is_empty() {
			return Ok(Vec::new());
		}

		let (trellis, backpointers) = self.viterbi_trellis(observations);
		let last = trellis.last_column();

		let terminal = match selection {
			TerminalSelection::SmallestBackpointer => (START_ROW + 1..backpointers.rows())
				.filter_map(|row| backpointers.get(row, last).map(|from| (row, from)))
				.min_by_key(|&(_, from)| from)
				.map(|(row, _)| row),
			TerminalSelection::MaxProbability => trellis.argmax(last).map(|state| state + 1),
		};
		let mut row = terminal.ok_or(HmmError::NoViablePath)?;

		let mut path = vec![0; observations.len()];
		for column in (1..=last).rev() {
			path[column - 1] = row.checked_sub(1).ok_or(HmmError::NoViablePath)?;
			row = backpointers.get(row, column).ok_or(HmmError::NoViablePath)?;
		}

		Ok(path.into_iter().map(|state| self.states()[state].as_str()).collect())
	}

	/// Probability of the single most probable path.
	///
	/// # Errors
	/// `NoViablePath` if no path can emit the observations.
	pub fn viterbi_probability<S: AsRef<str>>(&self, observations: &[S]) -> Result<f64> {
		let (trellis, _) = self.viterbi_trellis(observations);
		let best = trellis.column_max(trellis.last_column());
		if best > 0.0 { Ok(best) } else { Err(HmmError::NoViablePath) }
	}
}
