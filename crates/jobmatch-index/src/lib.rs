pub mod tokenize;
pub mod vectorizer;
pub mod matrix;
pub mod index;
pub mod store;

pub use index::TfidfJobIndex;
pub use matrix::CsrMatrix;
pub use store::{MATRIX_FILE, META_FILE, VECTORIZER_FILE};
pub use vectorizer::TfidfVectorizer;
