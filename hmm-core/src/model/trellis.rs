/// Row of the start placeholder in every grid.
pub(crate) const START_ROW: usize = 0;

/// Dense `rows × columns` matrix used by the dynamic programs.
///
/// Rows are the start placeholder (`START_ROW`) followed by every real state
/// in the model's fixed order, so state `i` lives in row `i + 1`.
/// Column `t` holds the values after consuming `t` observations.
#[derive(Clone, Debug)]
pub(crate) struct Grid<T> {
	rows: usize,
	columns: usize,
	cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
	pub fn new(n_states: usize, n_observations: usize, fill: T) -> Self {
		let rows = n_states + 1;
		let columns = n_observations + 1;
		Self {
			rows,
			columns,
			cells: vec![fill; rows * columns],
		}
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn last_column(&self) -> usize {
		self.columns - 1
	}

	pub fn get(&self, row: usize, column: usize) -> T {
		self.cells[column * self.rows + row]
	}

	pub fn set(&mut self, row: usize, column: usize, value: T) {
		self.cells[column * self.rows + row] = value;
	}
}

/// Probability trellis. Column 0 is `1.0` at the start placeholder and `0.0` elsewhere.
pub(crate) type Trellis = Grid<f64>;

impl Trellis {
	pub fn seeded(n_states: usize, n_observations: usize) -> Self {
		let mut trellis = Self::new(n_states, n_observations, 0.0);
		trellis.set(START_ROW, 0, 1.0);
		trellis
	}

	/// State index of the first real row holding the maximum strictly
	/// positive value of `column`.
	pub fn argmax(&self, column: usize) -> Option<usize> {
		let mut best = 0.0;
		let mut best_row = None;
		for row in START_ROW + 1..self.rows {
			let value = self.get(row, column);
			if value > best {
				best = value;
				best_row = Some(row);
			}
		}
		best_row.map(|row| row - 1)
	}

	pub fn column_sum(&self, column: usize) -> f64 {
		(0..self.rows).map(|row| self.get(row, column)).sum()
	}

	pub fn column_max(&self, column: usize) -> f64 {
		(0..self.rows).map(|row| self.get(row, column)).fold(0.0, f64::max)
	}
}

/// Per-cell predecessor row; `None` when no predecessor had nonzero weight.
pub(crate) type Backpointers = Grid<Option<usize>>;
