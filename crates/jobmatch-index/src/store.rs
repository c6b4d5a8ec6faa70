//! On-disk artifacts: `vectorizer.bin`, `tfidf_matrix.bin` (bincode) and
//! `meta.json`. Writes are not atomic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use jobmatch_core::error::{Error, Result};
use jobmatch_core::types::CorpusItem;

use crate::index::TfidfJobIndex;
use crate::matrix::CsrMatrix;
use crate::vectorizer::TfidfVectorizer;

pub const VECTORIZER_FILE: &str = "vectorizer.bin";
pub const MATRIX_FILE: &str = "tfidf_matrix.bin";
pub const META_FILE: &str = "meta.json";

fn read_artifact(path: &Path) -> Result<Vec<u8>> {
	if !path.is_file() {
		return Err(Error::ArtifactNotFound(path.to_path_buf()));
	}
	Ok(fs::read(path)?)
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
	let bytes = read_artifact(path)?;
	bincode::deserialize(&bytes).map_err(|e| Error::corrupt(path, e.to_string()))
}

fn write_bincode<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
	let bytes = bincode::serialize(value)
		.map_err(|e| Error::Internal(format!("encoding {}: {e}", path.display())))?;
	fs::write(path, bytes)?;
	Ok(())
}

impl TfidfJobIndex {
	/// Write the three artifacts into `dir`, creating it if needed.
	pub fn save(&self, dir: &Path) -> Result<()> {
		fs::create_dir_all(dir)?;
		write_bincode(&dir.join(VECTORIZER_FILE), &self.vectorizer)?;
		write_bincode(&dir.join(MATRIX_FILE), &self.matrix)?;
		let meta = serde_json::to_string_pretty(&self.meta)
			.map_err(|e| Error::Internal(format!("encoding {META_FILE}: {e}")))?;
		fs::write(dir.join(META_FILE), meta)?;
		tracing::info!(dir = %dir.display(), documents = self.len(), "saved index artifacts");
		Ok(())
	}

	/// Read an index written by `save`.
	pub fn load(dir: &Path) -> Result<Self> {
		let vectorizer_path = dir.join(VECTORIZER_FILE);
		let matrix_path = dir.join(MATRIX_FILE);
		let meta_path: PathBuf = dir.join(META_FILE);

		let vectorizer: TfidfVectorizer = read_bincode(&vectorizer_path)?;
		let matrix: CsrMatrix = read_bincode(&matrix_path)?;
		let meta: Vec<CorpusItem> = serde_json::from_slice(&read_artifact(&meta_path)?)
			.map_err(|e| Error::corrupt(&meta_path, e.to_string()))?;

		vectorizer.validate().map_err(|r| Error::corrupt(&vectorizer_path, r))?;
		matrix.validate().map_err(|r| Error::corrupt(&matrix_path, r))?;
		if matrix.rows() != meta.len() {
			return Err(Error::corrupt(
				&matrix_path,
				format!("{} rows but {} entries in {META_FILE}", matrix.rows(), meta.len()),
			));
		}
		if matrix.cols() != vectorizer.vocabulary().len() {
			return Err(Error::corrupt(
				&matrix_path,
				format!("{} columns but vocabulary has {} terms", matrix.cols(), vectorizer.vocabulary().len()),
			));
		}
		tracing::info!(dir = %dir.display(), documents = meta.len(), vocabulary = matrix.cols(), "loaded index artifacts");
		Ok(Self { vectorizer, matrix, meta })
	}
}
