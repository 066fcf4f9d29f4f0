use super::hmm::Hmm;
use super::trellis::Trellis;
use crate::error::{HmmError, Result};

impl Hmm {
	/// Fills the forward trellis: each cell is the total probability of all
	/// paths that emit the first `t` observations and end in that row.
	fn forward_trellis<S: AsRef<str>>(&self, observations: &[S]) -> Trellis {
		let symbols = self.observation_indices(observations);
		let mut trellis = Trellis::seeded(self.n_states(), symbols.len());

		for (t, &symbol) in symbols.iter().enumerate() {
			let column = t + 1;
			for state in 0..self.n_states() {
				let mut total = 0.0;
				for from in 0..trellis.rows() {
					let previous = trellis.get(from, column - 1);
					if previous > 0.0 {
						total += previous * self.step_weight(from, state, symbol);
					}
				}
				trellis.set(state + 1, column, total);
			}
		}

		trellis
	}

	/// Returns the state most likely to be the final hidden state after
	/// the whole observation sequence.
	///
	/// Ties keep the first state in the model's state order.
	///
	/// # Returns
	/// - `Ok(Some(state))` for the most probable final state
	/// - `Ok(None)` for an empty observation sequence
	///
	/// # Errors
	/// `NoViablePath` if no state path can emit the sequence.
	pub fn forward<S: AsRef<str>>(&self, observations: &[S]) -> Result<Option<&str>> {
		if observations.is_empty() {
			return Ok(None);
		}

		let trellis = self.forward_trellis(observations);
		match trellis.argmax(trellis.last_column()) {
			Some(state) => Ok(Some(self.states()[state].as_str())),
			None => Err(HmmError::NoViablePath),
		}
	}

	/// Total probability of the observation sequence under the model.
	///
	/// The empty sequence has probability `1.0`.
	pub fn likelihood<S: AsRef<str>>(&self, observations: &[S]) -> f64 {
		let trellis = self.forward_trellis(observations);
		trellis.column_sum(trellis.last_column())
	}
}
