//! Fitted TF-IDF weighting: vocabulary, smoothed idf and row normalization.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use jobmatch_core::config::VectorizerConfig;
use jobmatch_core::error::{Error, Result};

use crate::matrix::CsrMatrix;
use crate::tokenize::Analyzer;

/// The learned half of the index. Serialized as `vectorizer.bin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
	ngram_range: (usize, usize),
	n_docs: usize,
	/// term -> column; columns follow lexicographic term order.
	vocabulary: BTreeMap<String, usize>,
	idf: Vec<f32>,
}

fn term_counts(analyzer: &Analyzer, doc: &str) -> HashMap<String, usize> {
	let mut counts = HashMap::new();
	for term in analyzer.analyze(doc) {
		*counts.entry(term).or_insert(0) += 1;
	}
	counts
}

#[allow(clippy::cast_precision_loss)]
fn smooth_idf(n_docs: usize, df: usize) -> f32 {
	(((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0) as f32
}

/// Scale `row` to unit Euclidean length. All-zero rows are left alone.
pub fn l2_normalize(row: &mut [(usize, f32)]) {
	let norm = row.iter().map(|&(_, v)| v * v).sum::<f32>().sqrt();
	if norm > 0.0 {
		for (_, v) in row.iter_mut() {
			*v /= norm;
		}
	}
}

impl TfidfVectorizer {
	/// Learn vocabulary and idf from `docs` and return the weighted rows.
	pub fn fit_transform(config: &VectorizerConfig, docs: &[String]) -> Result<(Self, CsrMatrix)> {
		config.validate()?;
		if docs.is_empty() {
			return Err(Error::EmptyCorpus);
		}
		let analyzer = Analyzer::new(config.ngram_range);
		let n_docs = docs.len();
		let counts: Vec<HashMap<String, usize>> = docs.iter().map(|d| term_counts(&analyzer, d)).collect();

		let mut df: HashMap<&str, usize> = HashMap::new();
		let mut total: HashMap<&str, usize> = HashMap::new();
		for doc in &counts {
			for (term, &c) in doc {
				*df.entry(term.as_str()).or_insert(0) += 1;
				*total.entry(term.as_str()).or_insert(0) += c;
			}
		}
		if df.is_empty() {
			return Err(Error::NoFeatures("empty vocabulary; documents only contain stop words".into()));
		}

		let max_doc = config.max_df.max_count(n_docs);
		let min_doc = config.min_df.min_count(n_docs);
		if max_doc < min_doc {
			return Err(Error::InvalidConfig(format!(
				"max_df resolves to {max_doc} documents, fewer than min_df ({min_doc})"
			)));
		}

		let mut kept: Vec<&str> = df
			.iter()
			.filter(|&(_, &d)| d >= min_doc && d <= max_doc)
			.map(|(&t, _)| t)
			.collect();
		if kept.is_empty() {
			return Err(Error::NoFeatures(format!(
				"no terms left after pruning (min_df={min_doc}, max_df={max_doc}); lower min_df or raise max_df"
			)));
		}
		if kept.len() > config.max_features {
			kept.sort_unstable_by(|a, b| total[b].cmp(&total[a]).then_with(|| a.cmp(b)));
			kept.truncate(config.max_features);
		}
		kept.sort_unstable();

		let vocabulary: BTreeMap<String, usize> =
			kept.iter().enumerate().map(|(col, &t)| (t.to_string(), col)).collect();
		let idf: Vec<f32> = kept.iter().map(|t| smooth_idf(n_docs, df[t])).collect();

		let vectorizer = Self { ngram_range: config.ngram_range, n_docs, vocabulary, idf };
		let mut matrix = CsrMatrix::new(vectorizer.vocabulary.len());
		for doc in &counts {
			matrix.push_row(&vectorizer.weigh(doc));
		}
		tracing::debug!(
			documents = n_docs,
			terms = df.len(),
			vocabulary = vectorizer.vocabulary.len(),
			"fitted vectorizer"
		);
		Ok((vectorizer, matrix))
	}

	/// Weighted, unit-length sparse vector for `text`. Unknown terms are ignored.
	pub fn transform(&self, text: &str) -> Vec<(usize, f32)> {
		self.weigh(&term_counts(&self.analyzer(), text))
	}

	#[allow(clippy::cast_precision_loss)]
	fn weigh(&self, counts: &HashMap<String, usize>) -> Vec<(usize, f32)> {
		let mut row: Vec<(usize, f32)> = counts
			.iter()
			.filter_map(|(term, &c)| self.vocabulary.get(term).map(|&col| (col, c as f32 * self.idf[col])))
			.collect();
		row.sort_unstable_by_key(|&(col, _)| col);
		l2_normalize(&mut row);
		row
	}

	pub fn analyzer(&self) -> Analyzer {
		Analyzer::new(self.ngram_range)
	}

	pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
		&self.vocabulary
	}

	pub fn idf(&self) -> &[f32] {
		&self.idf
	}

	pub fn n_docs(&self) -> usize {
		self.n_docs
	}

	/// Consistency check for vectorizers read back from disk.
	pub fn validate(&self) -> std::result::Result<(), String> {
		let (min_n, max_n) = self.ngram_range;
		if min_n == 0 || min_n > max_n {
			return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
		}
		if self.vocabulary.len() != self.idf.len() {
			return Err(format!("{} terms but {} idf weights", self.vocabulary.len(), self.idf.len()));
		}
		let mut seen = vec![false; self.idf.len()];
		for &col in self.vocabulary.values() {
			match seen.get_mut(col) {
				Some(slot) if !*slot => *slot = true,
				_ => return Err(format!("vocabulary column {col} is out of range or repeated")),
			}
		}
		if self.idf.iter().any(|w| !w.is_finite()) {
			return Err("non-finite idf weight".into());
		}
		Ok(())
	}
}
