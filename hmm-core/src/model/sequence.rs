use std::fmt;

use serde::{Deserialize, Serialize};

/// A sequence of hidden states together with the symbols they emitted.
///
/// Produced by `Hmm::generate`, or built from decoded states and the
/// observations they were decoded from.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Sequence {
	states: Vec<String>,
	outputs: Vec<String>,
}

impl Sequence {
	pub fn new(states: Vec<String>, outputs: Vec<String>) -> Self {
		Self { states, outputs }
	}

	pub fn states(&self) -> &[String] {
		&self.states
	}

	pub fn outputs(&self) -> &[String] {
		&self.outputs
	}

	/// Records one step of the sequence.
	pub(crate) fn push(&mut self, state: &str, output: &str) {
		self.states.push(state.to_owned());
		self.outputs.push(output.to_owned());
	}

	/// Number of observations.
	pub fn len(&self) -> usize {
		self.outputs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.outputs.is_empty()
	}
}

impl fmt::Display for Sequence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "{}", self.states.join(" "))?;
		writeln!(f, "{}", self.outputs.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn displays_states_then_outputs() {
		let mut sequence = Sequence::default();
		sequence.push("happy", "purr");
		sequence.push("grumpy", "silent");
		assert_eq!(sequence.len(), 2);
		assert_eq!(sequence.to_string(), "happy grumpy\npurr silent\n");
	}
}
