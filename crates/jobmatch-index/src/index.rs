//! jobmatch-index
//!
//! TF-IDF job index: fit on the corpus documents, rank jobs for a query by
//! cosine similarity. Persistence lives in `store`.
use jobmatch_core::config::VectorizerConfig;
use jobmatch_core::error::{Error, Result};
use jobmatch_core::traits::JobIndex;
use jobmatch_core::types::{CorpusItem, SearchResult};

use crate::matrix::CsrMatrix;
use crate::vectorizer::TfidfVectorizer;

#[derive(Debug, Clone)]
pub struct TfidfJobIndex {
	pub(crate) vectorizer: TfidfVectorizer,
	pub(crate) matrix: CsrMatrix,
	pub(crate) meta: Vec<CorpusItem>,
}

impl TfidfJobIndex {
	/// Fit on `docs`; `meta[i]` describes `docs[i]`.
	pub fn fit(docs: &[String], meta: Vec<CorpusItem>, config: &VectorizerConfig) -> Result<Self> {
		if docs.len() != meta.len() {
			return Err(Error::InvalidConfig(format!(
				"{} documents but {} metadata rows",
				docs.len(),
				meta.len()
			)));
		}
		let (vectorizer, matrix) = TfidfVectorizer::fit_transform(config, docs)?;
		tracing::info!(
			documents = matrix.rows(),
			vocabulary = matrix.cols(),
			nnz = matrix.nnz(),
			"fitted tf-idf index"
		);
		Ok(Self { vectorizer, matrix, meta })
	}

	/// Assemble an index from already fitted parts, checking that they line up.
	pub fn from_parts(vectorizer: TfidfVectorizer, matrix: CsrMatrix, meta: Vec<CorpusItem>) -> Result<Self> {
		matrix.validate().map_err(Error::Internal)?;
		vectorizer.validate().map_err(Error::Internal)?;
		if matrix.rows() != meta.len() {
			return Err(Error::Internal(format!("{} matrix rows but {} metadata rows", matrix.rows(), meta.len())));
		}
		if matrix.cols() != vectorizer.vocabulary().len() {
			return Err(Error::Internal(format!(
				"{} matrix columns but {} vocabulary terms",
				matrix.cols(),
				vectorizer.vocabulary().len()
			)));
		}
		Ok(Self { vectorizer, matrix, meta })
	}

	/// Cosine similarity of `text` against every job, in corpus order.
	pub fn scores(&self, text: &str) -> Vec<f32> {
		let mut dense = vec![0.0f32; self.matrix.cols()];
		for (col, w) in self.vectorizer.transform(text) {
			dense[col] = w;
		}
		// An empty row sums to -0.0, so anything not positive becomes +0.0.
		(0..self.matrix.rows())
			.map(|i| {
				let s = self.matrix.dot_dense(i, &dense);
				if s > 0.0 { s.min(1.0) } else { 0.0 }
			})
			.collect()
	}

	/// The `top_k` best matching jobs, best first. `top_k` is clamped to
	/// `1..=len()`; equal scores keep corpus order.
	pub fn query(&self, text: &str, top_k: usize) -> Vec<SearchResult> {
		let n = self.len();
		if n == 0 {
			return Vec::new();
		}
		let scores = self.scores(text);
		let mut order: Vec<usize> = (0..n).collect();
		order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then_with(|| a.cmp(&b)));
		order
			.into_iter()
			.take(top_k.clamp(1, n))
			.map(|i| SearchResult::from_item(&self.meta[i], scores[i]))
			.collect()
	}

	pub fn len(&self) -> usize {
		self.meta.len()
	}

	pub fn is_empty(&self) -> bool {
		self.meta.is_empty()
	}

	pub fn vocabulary_size(&self) -> usize {
		self.matrix.cols()
	}

	pub fn meta(&self) -> &[CorpusItem] {
		&self.meta
	}

	pub fn vectorizer(&self) -> &TfidfVectorizer {
		&self.vectorizer
	}

	pub fn matrix(&self) -> &CsrMatrix {
		&self.matrix
	}
}

impl JobIndex for TfidfJobIndex {
	fn len(&self) -> usize {
		self.meta.len()
	}

	fn query(&self, text: &str, top_k: usize) -> Result<Vec<SearchResult>> {
		Ok(TfidfJobIndex::query(self, text, top_k))
	}
}
