//! Jobs table loading and document construction.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{CorpusItem, JobRecord};

/// Columns the jobs table must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = ["job_id", "title", "company", "location", "description"];

/// Read every row of the jobs CSV at `path`.
pub fn read_jobs_csv(path: &Path) -> Result<Vec<JobRecord>> {
    let file = fs::File::open(path)?;
    let jobs = read_jobs(file)?;
    tracing::info!(path = %path.display(), jobs = jobs.len(), "read jobs table");
    Ok(jobs)
}

/// Read jobs from any CSV source with a header row.
pub fn read_jobs<R: Read>(source: R) -> Result<Vec<JobRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers = reader.headers()?.clone();
    let mut positions = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| Error::Schema(column.to_string()))?;
    }

    let mut jobs = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(positions[i]).unwrap_or("").to_string();
        jobs.push(JobRecord {
            job_id: cell(0),
            title: cell(1),
            company: cell(2),
            location: cell(3),
            description: cell(4),
        });
    }
    Ok(jobs)
}

/// The text indexed for a job: title, company, location and description,
/// space separated in that order.
pub fn document_text(job: &JobRecord) -> String {
    format!("{} {} {} {}", job.title, job.company, job.location, job.description)
}

/// Row-aligned documents and metadata for `TfidfJobIndex::fit`.
pub fn build_corpus(jobs: &[JobRecord]) -> (Vec<String>, Vec<CorpusItem>) {
    jobs.iter().map(|j| (document_text(j), CorpusItem::from(j))).unzip()
}

/// A resume on disk; `resume_id` is the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub resume_id: String,
    pub path: PathBuf,
}

/// `*.txt` files directly under `dir`, sorted by file name.
pub fn list_resumes(dir: &Path) -> Result<Vec<ResumeFile>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(format!("resumes directory {}", dir.display())));
    }
    let mut resumes = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            resumes.push(ResumeFile { resume_id: stem.to_string_lossy().to_string(), path: path.to_path_buf() });
        }
    }
    Ok(resumes)
}

/// Resolve `<dir>/<resume_id>.txt`.
///
/// Ids must be a bare file stem: empty ids, ids with surrounding whitespace,
/// path separators or `..` are rejected as `BadRequest`; a missing file is
/// `NotFound`.
pub fn resolve_resume(dir: &Path, resume_id: &str) -> Result<PathBuf> {
    let malformed = resume_id.is_empty()
        || resume_id.trim() != resume_id
        || resume_id.contains(['/', '\\'])
        || resume_id.contains("..");
    if malformed {
        return Err(Error::BadRequest(format!("Invalid resume_id: {resume_id}")));
    }
    let path = dir.join(format!("{resume_id}.txt"));
    if !path.is_file() {
        return Err(Error::NotFound(format!("Resume not found: {resume_id}")));
    }
    Ok(path)
}

/// Read a resume as text, falling back to lossy decoding for non-UTF-8 files.
pub fn read_resume(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(path)?).to_string()),
    }
}
