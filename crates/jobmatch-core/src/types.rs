//! Domain types shared by the index and the query services.

use serde::{Deserialize, Serialize};

/// One row of the jobs table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

/// Metadata kept next to the document-term matrix, one per row.
///
/// Persisted as the `meta.json` artifact in row order so that result
/// display never has to go back to the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusItem {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

impl From<&JobRecord> for CorpusItem {
    fn from(job: &JobRecord) -> Self {
        Self {
            job_id: job.job_id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
        }
    }
}

/// A ranked match. `score` is the cosine similarity, in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub score: f32,
}

impl SearchResult {
    pub fn from_item(item: &CorpusItem, score: f32) -> Self {
        Self {
            job_id: item.job_id.clone(),
            title: item.title.clone(),
            company: item.company.clone(),
            location: item.location.clone(),
            score,
        }
    }
}
