use std::collections::HashMap;
use std::path::Path;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::sequence::Sequence;
use super::table::ProbabilityTable;
use crate::error::{HmmError, Result};
use crate::io::resource_path;

/// Label of the virtual start state. Its transition row is the initial
/// state distribution.
pub const START_STATE: &str = "#";

/// A discrete Hidden Markov Model over string-labelled states and symbols.
///
/// Holds the transition and emission tables as loaded, plus dense matrices
/// indexed by a fixed state order. The order is computed once, here, and
/// every consumer (generation, forward, viterbi) uses it.
///
/// # Invariants
/// - `states` never contains `START_STATE`
/// - `states` starts with the start row's destinations, in table order,
///   followed by states that only appear elsewhere, in order of first appearance
/// - `initial`, `transition` and `emission` mirror the tables, absent entries are `0.0`
/// - The model is never mutated after construction
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Hmm {
	transitions: ProbabilityTable,
	emissions: ProbabilityTable,

	/// Fixed state order
	states: Vec<String>,
	state_index: HashMap<String, usize>,
	symbol_index: HashMap<String, usize>,

	/// `initial[s]` = P(s | #)
	initial: Vec<f64>,
	/// `transition[i * n + j]` = P(j | i), row-major
	transition: Vec<f64>,
	/// `emission[i * v + k]` = P(symbol k | state i), row-major
	emission: Vec<f64>,
}

fn register(label: &str, states: &mut Vec<String>, index: &mut HashMap<String, usize>) {
	if label != START_STATE && !index.contains_key(label) {
		index.insert(label.to_owned(), states.len());
		states.push(label.to_owned());
	}
}

impl Hmm {
	/// Builds a model from already parsed tables.
	pub fn new(transitions: ProbabilityTable, emissions: ProbabilityTable) -> Self {
		let mut states = Vec::new();
		let mut state_index = HashMap::new();

		if let Some(start) = transitions.row(START_STATE) {
			for (state, _) in start.entries() {
				register(state, &mut states, &mut state_index);
			}
		} else {
			log::warn!("transition table has no '{START_STATE}' row, every state is unreachable");
		}
		for row in transitions.rows() {
			register(row.key(), &mut states, &mut state_index);
			for (state, _) in row.entries() {
				if state == START_STATE {
					log::warn!("ignoring transition '{}' -> '{START_STATE}'", row.key());
				}
				register(state, &mut states, &mut state_index);
			}
		}
		for row in emissions.rows() {
			register(row.key(), &mut states, &mut state_index);
		}

		let mut symbol_index: HashMap<String, usize> = HashMap::new();
		for row in emissions.rows() {
			for (symbol, _) in row.entries() {
				if !symbol_index.contains_key(symbol) {
					symbol_index.insert(symbol.to_owned(), symbol_index.len());
				}
			}
		}

		let n = states.len();
		let v = symbol_index.len();
		let mut initial = vec![0.0; n];
		let mut transition = vec![0.0; n * n];
		let mut emission = vec![0.0; n * v];

		for row in transitions.rows() {
			for (to, p) in row.entries() {
				let Some(&j) = state_index.get(to) else { continue };
				if row.key() == START_STATE {
					initial[j] = p;
				} else if let Some(&i) = state_index.get(row.key()) {
					transition[i * n + j] = p;
				}
			}
		}
		for row in emissions.rows() {
			let Some(&i) = state_index.get(row.key()) else { continue };
			for (symbol, p) in row.entries() {
				if let Some(&k) = symbol_index.get(symbol) {
					emission[i * v + k] = p;
				}
			}
		}

		log::debug!("model has {n} states and {v} symbols");

		Self {
			transitions,
			emissions,
			states,
			state_index,
			symbol_index,
			initial,
			transition,
			emission,
		}
	}

	/// Loads a model from `<basename>.trans` and `<basename>.emit`.
	///
	/// # Errors
	/// - `MissingResource` if either file does not exist
	/// - `Parse` if a line is not a usable `from to probability` triple
	pub fn load<P: AsRef<Path>>(basename: P) -> Result<Self> {
		let basename = basename.as_ref();
		let transitions = ProbabilityTable::load(resource_path(basename, "trans"))?;
		let emissions = ProbabilityTable::load(resource_path(basename, "emit"))?;
		Ok(Self::new(transitions, emissions))
	}

	pub fn transitions(&self) -> &ProbabilityTable {
		&self.transitions
	}

	pub fn emissions(&self) -> &ProbabilityTable {
		&self.emissions
	}

	/// Real states in the fixed order used by every trellis.
	pub fn states(&self) -> &[String] {
		&self.states
	}

	pub fn n_states(&self) -> usize {
		self.states.len()
	}

	/// Position of `label` in the fixed state order.
	pub fn state_index(&self, label: &str) -> Option<usize> {
		self.state_index.get(label).copied()
	}

	pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
		self.symbol_index.get(symbol).copied()
	}

	/// P(state | #)
	pub fn initial(&self, state: usize) -> f64 {
		self.initial.get(state).copied().unwrap_or(0.0)
	}

	/// P(to | from)
	pub fn transition(&self, from: usize, to: usize) -> f64 {
		let n = self.n_states();
		if from >= n || to >= n {
			return 0.0;
		}
		self.transition[from * n + to]
	}

	/// P(symbol | state). An unknown symbol (`None`) is never emitted.
	pub fn emission(&self, state: usize, symbol: Option<usize>) -> f64 {
		let v = self.symbol_index.len();
		match symbol {
			Some(k) if state < self.n_states() && k < v => self.emission[state * v + k],
			_ => 0.0,
		}
	}

	/// Maps observation labels to symbol indices, `None` for unseen symbols.
	pub(crate) fn observation_indices<S: AsRef<str>>(&self, observations: &[S]) -> Vec<Option<usize>> {
		observations.iter().map(|o| self.symbol_index(o.as_ref())).collect()
	}

	/// Generates an `n`-step sequence by sampling the model.
	///
	/// # Behavior
	/// - Draws the initial state from the `#` row
	/// - At each step draws a symbol from the current state's emission row,
	///   records `(state, symbol)`, then draws the next state from the
	///   current state's transition row if more steps remain
	/// - Weights are the listed probabilities, scanned in table order
	///
	/// # Errors
	/// Returns `EmptyDistribution` if a row needed for sampling is absent or
	/// carries no weight.
	pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Sequence> {
		let mut sequence = Sequence::default();
		if n == 0 {
			return Ok(sequence);
		}

		let mut state = draw(&self.transitions, START_STATE, "transition", rng)?;
		for step in 0..n {
			let output = draw(&self.emissions, state, "emission", rng)?;
			log::trace!("step {step}: {state} emits {output}");
			sequence.push(state, output);

			if step + 1 < n {
				state = draw(&self.transitions, state, "transition", rng)?;
			}
		}

		Ok(sequence)
	}

	/// Weight of entering `state` from trellis row `from_row` and emitting `symbol`.
	///
	/// Row 0 is the start placeholder, row `i + 1` is state `i`.
	pub(crate) fn step_weight(&self, from_row: usize, state: usize, symbol: Option<usize>) -> f64 {
		let enter = match from_row {
			0 => self.initial(state),
			row => self.transition(row - 1, state),
		};
		enter * self.emission(state, symbol)
	}
}

fn draw<'a, R: Rng + ?Sized>(
	table: &'a ProbabilityTable,
	state: &str,
	table_name: &'static str,
	rng: &mut R,
) -> Result<&'a str> {
	table
		.row(state)
		.and_then(|row| row.sample(rng))
		.ok_or_else(|| HmmError::EmptyDistribution {
			state: state.to_owned(),
			table: table_name,
		})
}
