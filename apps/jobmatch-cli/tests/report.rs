use std::fs;
use tempfile::TempDir;

use jobmatch_cli::check_top_k;
use jobmatch_cli::report::{score_all, score_resume, write_reports, CSV_REPORT, MARKDOWN_REPORT};
use jobmatch_core::config::{DfThreshold, VectorizerConfig};
use jobmatch_core::corpus::{build_corpus, list_resumes, read_jobs};
use jobmatch_core::error::Error;
use jobmatch_index::TfidfJobIndex;

const JOBS_CSV: &str = "\
job_id,title,company,location,description
1,Python Engineer,Acme,Remote,Python AWS
2,Data Analyst,Globex,Berlin,Python SQL
3,Designer,\"Initech | Studio\",Paris,Figma
";

fn index() -> TfidfJobIndex {
    let jobs = read_jobs(JOBS_CSV.as_bytes()).expect("jobs");
    let (docs, meta) = build_corpus(&jobs);
    let config = VectorizerConfig { min_df: DfThreshold::Count(1), ..VectorizerConfig::default() };
    TfidfJobIndex::fit(&docs, meta, &config).expect("fit")
}

fn resumes_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("resume_b.txt"), "Figma designer").unwrap();
    fs::write(tmp.path().join("resume_a.txt"), "Python and AWS engineer").unwrap();
    fs::write(tmp.path().join("cover_letter.md"), "not a resume").unwrap();
    tmp
}

#[test]
fn rows_are_ranked_per_resume_in_file_name_order() {
    let index = index();
    let dir = resumes_dir();
    let resumes = list_resumes(dir.path()).unwrap();
    let mut seen = Vec::new();
    let rows = score_all(&index, &resumes, 2, |r| seen.push(r.resume_id.clone())).expect("score");

    assert_eq!(seen, ["resume_a", "resume_b"]);
    assert_eq!(rows.len(), 4);
    assert_eq!((rows[0].resume_id.as_str(), rows[0].rank, rows[0].job_id.as_str()), ("resume_a", 1, "1"));
    assert_eq!(rows[1].rank, 2);
    assert_eq!((rows[2].resume_id.as_str(), rows[2].job_id.as_str()), ("resume_b", "3"));

    let single = score_resume(&index, &resumes[1], 1).expect("score");
    assert_eq!(single, rows[2..3]);
}

#[test]
fn reports_are_written_as_csv_and_markdown() {
    let index = index();
    let dir = resumes_dir();
    let out = TempDir::new().unwrap();
    let out_dir = out.path().join("reports");
    let resumes = list_resumes(dir.path()).unwrap();
    let rows = score_all(&index, &resumes, 3, |_| {}).expect("score");

    let (csv_path, md_path) = write_reports(&out_dir, &rows).expect("write");
    assert_eq!(csv_path, out_dir.join(CSV_REPORT));
    assert_eq!(md_path, out_dir.join(MARKDOWN_REPORT));

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, ["resume_id", "rank", "job_id", "title", "company", "location", "score"]);
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 6);
    assert_eq!(&records[0][0], "resume_a");
    let score = &records[0][6];
    assert_eq!(score.split('.').nth(1).map(str::len), Some(4), "score {score}");

    let md = fs::read_to_string(&md_path).unwrap();
    assert!(md.starts_with("# Resume to Job Top Matches"));
    assert!(md.contains("## resume_a"));
    assert!(md.contains("## resume_b"));
    assert!(md.contains("|---:|---:|---|---|---|---:|"));
    assert!(md.contains("Initech \\| Studio"));
}

#[test]
fn top_k_outside_the_configured_range_is_rejected() {
    assert_eq!(check_top_k(1, 50).unwrap(), 1);
    assert_eq!(check_top_k(50, 50).unwrap(), 50);
    for k in [0, 51, 500] {
        match check_top_k(k, 50) {
            Err(Error::BadRequest(msg)) => assert_eq!(msg, "top_k must be between 1 and 50"),
            other => panic!("top_k={k}: expected rejection, got {other:?}"),
        }
    }
    assert!(check_top_k(10, 5).is_err());
}

#[test]
fn pruned_jobs_are_reported_with_positive_zero_scores() {
    let csv = "job_id,title,company,location,description\n\
1,Java Dev,Globex,Berlin,Spring\n\
2,Python Engineer,Acme,Remote,AWS\n\
3,Python Engineer,Acme,Remote,AWS\n";
    let jobs = read_jobs(csv.as_bytes()).expect("jobs");
    let (docs, meta) = build_corpus(&jobs);
    let index = TfidfJobIndex::fit(&docs, meta, &VectorizerConfig::default()).expect("fit");

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("r.txt"), "python").unwrap();
    let resumes = list_resumes(dir.path()).unwrap();
    let rows = score_all(&index, &resumes, 3, |_| {}).expect("score");
    assert_eq!(rows[2].job_id, "1");
    assert_eq!(rows[2].score_text(), "0.0000");

    let out = TempDir::new().unwrap();
    let (csv_path, md_path) = write_reports(out.path(), &rows).expect("write");
    assert!(!fs::read_to_string(csv_path).unwrap().contains("-0.0000"));
    assert!(!fs::read_to_string(md_path).unwrap().contains("-0.0000"));
}
