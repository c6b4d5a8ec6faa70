use crate::error::Result;
use crate::types::SearchResult;

/// Read-only ranking surface shared by the HTTP service and the report CLI.
pub trait JobIndex: Send + Sync {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn query(&self, text: &str, top_k: usize) -> Result<Vec<SearchResult>>;
}
