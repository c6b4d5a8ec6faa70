//! Batch scoring of every resume and the CSV / Markdown report writers.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use jobmatch_core::corpus::{read_resume, ResumeFile};
use jobmatch_core::error::{Error, Result};
use jobmatch_core::traits::JobIndex;

pub const CSV_REPORT: &str = "resume_job_matches.csv";
pub const MARKDOWN_REPORT: &str = "resume_job_matches.md";

const CSV_HEADER: [&str; 7] = ["resume_id", "rank", "job_id", "title", "company", "location", "score"];

/// One ranked match for one resume. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub resume_id: String,
    pub rank: usize,
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub score: f32,
}

impl ReportRow {
    pub fn score_text(&self) -> String {
        format!("{:.4}", self.score)
    }
}

/// Query the index with the resume's text and number the results.
pub fn score_resume(index: &dyn JobIndex, resume: &ResumeFile, top_k: usize) -> Result<Vec<ReportRow>> {
    let text = read_resume(&resume.path)?;
    let results = index.query(&text, top_k)?;
    Ok(results
        .into_iter()
        .enumerate()
        .map(|(i, r)| ReportRow {
            resume_id: resume.resume_id.clone(),
            rank: i + 1,
            job_id: r.job_id,
            title: r.title,
            company: r.company,
            location: r.location,
            score: r.score,
        })
        .collect())
}

/// Score resumes in the given order, calling `progress` after each one.
pub fn score_all(
    index: &dyn JobIndex,
    resumes: &[ResumeFile],
    top_k: usize,
    mut progress: impl FnMut(&ResumeFile),
) -> Result<Vec<ReportRow>> {
    let mut rows = Vec::new();
    for resume in resumes {
        rows.extend(score_resume(index, resume, top_k)?);
        progress(resume);
    }
    Ok(rows)
}

pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        let rank = row.rank.to_string();
        let score = row.score_text();
        writer.write_record([
            row.resume_id.as_str(),
            rank.as_str(),
            row.job_id.as_str(),
            row.title.as_str(),
            row.company.as_str(),
            row.location.as_str(),
            score.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Markdown report text: one section and table per resume, in row order.
pub fn render_markdown(rows: &[ReportRow]) -> String {
    let mut out = String::from("# Resume to Job Top Matches\n\n");
    let mut current: Option<&str> = None;
    for row in rows {
        if current != Some(row.resume_id.as_str()) {
            current = Some(row.resume_id.as_str());
            let _ = write!(out, "\n## {}\n\n", cell(&row.resume_id));
            out.push_str("| Rank | Job ID | Title | Company | Location | Score |\n");
            out.push_str("|---:|---:|---|---|---|---:|\n");
        }
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            row.rank,
            cell(&row.job_id),
            cell(&row.title),
            cell(&row.company),
            cell(&row.location),
            row.score_text()
        );
    }
    out
}

pub fn write_markdown(path: &Path, rows: &[ReportRow]) -> Result<()> {
    fs::write(path, render_markdown(rows))?;
    Ok(())
}

/// Write both reports into `dir`, creating it if needed.
pub fn write_reports(dir: &Path, rows: &[ReportRow]) -> Result<(PathBuf, PathBuf)> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::InvalidConfig(format!("report path {} is not a directory", dir.display())));
    }
    fs::create_dir_all(dir)?;
    let csv_path = dir.join(CSV_REPORT);
    let md_path = dir.join(MARKDOWN_REPORT);
    write_csv(&csv_path, rows)?;
    write_markdown(&md_path, rows)?;
    tracing::info!(csv = %csv_path.display(), markdown = %md_path.display(), rows = rows.len(), "wrote reports");
    Ok((csv_path, md_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(resume: &str, rank: usize, title: &str, score: f32) -> ReportRow {
        ReportRow {
            resume_id: resume.into(),
            rank,
            job_id: rank.to_string(),
            title: title.into(),
            company: "Acme".into(),
            location: "Remote".into(),
            score,
        }
    }

    #[test]
    fn markdown_groups_rows_by_resume_and_escapes_pipes() {
        let rows = [row("r1", 1, "Dev | Ops", 0.5), row("r1", 2, "QA", 0.25), row("r2", 1, "PM", 0.0)];
        let md = render_markdown(&rows);
        assert!(md.starts_with("# Resume to Job Top Matches\n"));
        assert_eq!(md.matches("| Rank | Job ID | Title | Company | Location | Score |").count(), 2);
        assert!(md.contains("\n## r1\n"));
        assert!(md.contains("| 1 | 1 | Dev \\| Ops | Acme | Remote | 0.5000 |"));
        assert!(md.contains("| 1 | 1 | PM | Acme | Remote | 0.0000 |"));
        assert!(md.find("## r1").unwrap() < md.find("## r2").unwrap());
    }

    #[test]
    fn empty_report_is_just_the_title() {
        assert_eq!(render_markdown(&[]), "# Resume to Job Top Matches\n\n");
    }
}
