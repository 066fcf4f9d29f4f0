use std::collections::HashMap;
use std::path::Path;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::error::{HmmError, Result};
use crate::io::read_file;

/// One row of a probability table: every entry sharing the same first key.
///
/// For a transition table the key is the source state and entries are
/// destination states; for an emission table the key is a state and entries
/// are observation symbols.
///
/// ## Invariants
/// - Entry labels are unique within the row
/// - Entries keep the order in which they were first inserted
/// - Probabilities are finite and non-negative
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Row {
	key: String,
	entries: Vec<(String, f64)>,
}

impl Row {
	/// Creates a new empty row for the given key.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			entries: Vec::new(),
		}
	}

	/// Sets the probability of `label`, overwriting in place if already present.
	pub fn insert(&mut self, label: &str, probability: f64) {
		match self.entries.iter_mut().find(|(l, _)| l == label) {
			Some(entry) => entry.1 = probability,
			None => self.entries.push((label.to_owned(), probability)),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Entries in table order.
	pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> {
		self.entries.iter().map(|(l, p)| (l.as_str(), *p))
	}

	/// Probability of `label`, `0.0` if absent.
	pub fn get(&self, label: &str) -> f64 {
		self.entries
			.iter()
			.find(|(l, _)| l == label)
			.map_or(0.0, |(_, p)| *p)
	}

	/// Sum of all probabilities in the row.
	pub fn total(&self) -> f64 {
		self.entries.iter().map(|(_, p)| p).sum()
	}

	/// Draws a label using weighted random sampling.
	///
	/// The probability of selecting a label is proportional to its weight.
	/// Weights are scanned in table order with a cumulative subtraction,
	/// zero-weight entries are never returned.
	///
	/// Returns `None` if the row carries no weight.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total <= 0.0 {
			return None;
		}

		let mut r = rng.random::<f64>() * total;

		let mut fallback: Option<&str> = None;
		for (label, probability) in self.entries() {
			if probability <= 0.0 {
				continue;
			}
			if r < probability {
				return Some(label);
			}
			r -= probability;
			fallback = Some(label);
		}

		// Rounding can leave a tiny remainder past the last bucket
		fallback
	}
}

/// A two-level probability table: `first → second → probability`.
///
/// Loaded from whitespace-delimited triples, one per line:
/// `<first> <second> <probability>`.
/// Lookups of pairs absent from the table yield `0.0`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProbabilityTable {
	rows: Vec<Row>,
	index: HashMap<String, usize>,
}

impl ProbabilityTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `table[first][second] = probability`.
	pub fn insert(&mut self, first: &str, second: &str, probability: f64) {
		let i = match self.index.get(first) {
			Some(&i) => i,
			None => {
				self.rows.push(Row::new(first));
				self.index.insert(first.to_owned(), self.rows.len() - 1);
				self.rows.len() - 1
			}
		};
		self.rows[i].insert(second, probability);
	}

	/// Returns the row for `first`, if any entry was recorded for it.
	pub fn row(&self, first: &str) -> Option<&Row> {
		self.index.get(first).map(|&i| &self.rows[i])
	}

	/// Rows in order of first appearance.
	pub fn rows(&self) -> impl Iterator<Item = &Row> {
		self.rows.iter()
	}

	/// Probability of `(first, second)`, `0.0` if absent.
	pub fn get(&self, first: &str, second: &str) -> f64 {
		self.row(first).map_or(0.0, |row| row.get(second))
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Returns the table as a plain nested mapping.
	pub fn to_nested(&self) -> HashMap<String, HashMap<String, f64>> {
		self.rows
			.iter()
			.map(|row| {
				let inner: HashMap<String, f64> = row.entries().map(|(l, p)| (l.to_owned(), p)).collect();
				(row.key.clone(), inner)
			})
			.collect()
	}

	/// Parses table text. `source` only labels parse errors.
	///
	/// # Errors
	/// Returns `HmmError::Parse` if a non-empty line is not exactly three
	/// fields or its probability is not a finite non-negative number.
	pub fn parse<S: AsRef<str>>(lines: &[S], source: &Path) -> Result<Self> {
		let mut table = Self::new();

		for (n, line) in lines.iter().enumerate() {
			let line = line.as_ref();
			if line.trim().is_empty() {
				continue;
			}

			let parse_error = |message: String| HmmError::Parse {
				path: source.to_path_buf(),
				line: n + 1,
				message,
			};

			let fields: Vec<&str> = line.split_whitespace().collect();
			let [first, second, probability] = fields.as_slice() else {
				return Err(parse_error(format!("expected 3 fields, got {}", fields.len())));
			};

			let probability: f64 = probability
				.parse()
				.map_err(|_| parse_error(format!("invalid probability '{probability}'")))?;
			if !probability.is_finite() || probability < 0.0 {
				return Err(parse_error(format!("probability out of range: {probability}")));
			}

			table.insert(first, second, probability);
		}

		for row in table.rows() {
			let total = row.total();
			if (total - 1.0).abs() > 1e-6 {
				log::debug!("{}: row '{}' sums to {total}", source.display(), row.key());
			}
		}

		Ok(table)
	}

	/// Loads a table from a file.
	///
	/// # Errors
	/// - `MissingResource` if the file does not exist
	/// - `Parse` for unusable lines
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let path = filepath.as_ref();
		let lines = read_file(path)?;
		let table = Self::parse(&lines, path)?;
		log::debug!("loaded {} rows from {}", table.rows.len(), path.display());
		Ok(table)
	}
}
