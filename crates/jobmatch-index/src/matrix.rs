//! Compressed sparse row matrix holding the weighted document-term rows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
	n_rows: usize,
	n_cols: usize,
	indptr: Vec<usize>,
	indices: Vec<usize>,
	data: Vec<f32>,
}

impl CsrMatrix {
	pub fn new(n_cols: usize) -> Self {
		Self { n_rows: 0, n_cols, indptr: vec![0], indices: Vec::new(), data: Vec::new() }
	}

	/// Append a row given as `(column, value)` pairs sorted by column.
	pub fn push_row(&mut self, row: &[(usize, f32)]) {
		for &(col, value) in row {
			debug_assert!(col < self.n_cols);
			self.indices.push(col);
			self.data.push(value);
		}
		self.indptr.push(self.indices.len());
		self.n_rows += 1;
	}

	pub fn rows(&self) -> usize {
		self.n_rows
	}

	pub fn cols(&self) -> usize {
		self.n_cols
	}

	pub fn nnz(&self) -> usize {
		self.data.len()
	}

	/// Column indices and values of row `i`.
	pub fn row(&self, i: usize) -> (&[usize], &[f32]) {
		let (start, end) = (self.indptr[i], self.indptr[i + 1]);
		(&self.indices[start..end], &self.data[start..end])
	}

	/// Dot product of row `i` with a dense vector of length `cols()`.
	pub fn dot_dense(&self, i: usize, dense: &[f32]) -> f32 {
		let (cols, values) = self.row(i);
		cols.iter().zip(values).map(|(&c, &v)| v * dense[c]).sum()
	}

	/// Structural check for matrices read back from disk.
	pub fn validate(&self) -> Result<(), String> {
		if self.indptr.len() != self.n_rows + 1 {
			return Err(format!("indptr has {} entries for {} rows", self.indptr.len(), self.n_rows));
		}
		if self.indptr.first() != Some(&0) {
			return Err("indptr must start at 0".into());
		}
		if self.indptr.windows(2).any(|w| w[0] > w[1]) {
			return Err("indptr is not monotonic".into());
		}
		if self.indices.len() != self.data.len() {
			return Err(format!("{} indices but {} values", self.indices.len(), self.data.len()));
		}
		if self.indptr.last() != Some(&self.indices.len()) {
			return Err("indptr does not cover the stored values".into());
		}
		if let Some(c) = self.indices.iter().find(|&&c| c >= self.n_cols) {
			return Err(format!("column {c} out of bounds for {} columns", self.n_cols));
		}
		if self.data.iter().any(|v| !v.is_finite()) {
			return Err("non-finite value".into());
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_and_dot_products() {
		let mut m = CsrMatrix::new(3);
		m.push_row(&[(0, 1.0), (2, 2.0)]);
		m.push_row(&[]);
		m.push_row(&[(1, 0.5)]);
		assert_eq!((m.rows(), m.cols(), m.nnz()), (3, 3, 3));
		assert_eq!(m.row(1).0.len(), 0);
		let dense = [1.0, 4.0, 0.5];
		assert_eq!(m.dot_dense(0, &dense), 2.0);
		assert_eq!(m.dot_dense(1, &dense), 0.0);
		assert_eq!(m.dot_dense(2, &dense), 2.0);
		assert!(m.validate().is_ok());
	}

	#[test]
	fn validate_rejects_broken_structure() {
		let mut m = CsrMatrix::new(2);
		m.push_row(&[(1, 1.0)]);
		let mut bad = m.clone();
		bad.n_cols = 1;
		assert!(bad.validate().is_err());
		let mut bad = m.clone();
		bad.indptr.push(5);
		assert!(bad.validate().is_err());
		let mut bad = m;
		bad.data[0] = f32::NAN;
		assert!(bad.validate().is_err());
	}
}
