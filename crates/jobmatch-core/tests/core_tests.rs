use std::fs;
use std::io::Write;
use tempfile::TempDir;

use jobmatch_core::config::{Config, DfThreshold};
use jobmatch_core::corpus::{build_corpus, list_resumes, read_jobs, read_jobs_csv, resolve_resume};
use jobmatch_core::error::Error;
use jobmatch_core::types::SearchResult;

const JOBS_CSV: &str = "\
job_id,title,company,location,description,salary
1,Python Engineer,Acme,Remote,Build services on AWS,100k
2,Java Developer,Globex,Berlin,\"Spring, Hibernate and SQL\",90k
";

#[test]
fn read_jobs_keeps_row_order_and_ignores_extra_columns() {
    let jobs = read_jobs(JOBS_CSV.as_bytes()).expect("read");
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].job_id, "1");
    assert_eq!(jobs[1].company, "Globex");
    assert_eq!(jobs[1].description, "Spring, Hibernate and SQL");
}

#[test]
fn missing_column_is_a_schema_error() {
    let csv = "job_id,title,company,description\n1,a,b,c\n";
    match read_jobs(csv.as_bytes()) {
        Err(Error::Schema(col)) => assert_eq!(col, "location"),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn corpus_documents_concatenate_fields_in_order() {
    let jobs = read_jobs(JOBS_CSV.as_bytes()).expect("read");
    let (docs, meta) = build_corpus(&jobs);
    assert_eq!(docs[0], "Python Engineer Acme Remote Build services on AWS");
    assert_eq!(meta.len(), docs.len());
    assert_eq!(meta[1].job_id, "2");
}

#[test]
fn read_jobs_csv_from_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("jobs.csv");
    fs::write(&path, JOBS_CSV).unwrap();
    assert_eq!(read_jobs_csv(&path).expect("read").len(), 2);
    assert!(matches!(read_jobs_csv(&tmp.path().join("nope.csv")), Err(Error::Io(_))));
}

#[test]
fn list_resumes_sorted_txt_only() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("resume_2.txt"), "go rust").unwrap();
    fs::write(dir.join("resume_1.txt"), "python").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested/resume_3.txt"), "nested is ignored").unwrap();

    let resumes = list_resumes(dir).expect("list");
    let ids: Vec<_> = resumes.iter().map(|r| r.resume_id.as_str()).collect();
    assert_eq!(ids, ["resume_1", "resume_2"]);
}

#[test]
fn resolve_resume_validates_ids() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("resume_1.txt"), "python").unwrap();

    assert_eq!(resolve_resume(dir, "resume_1").expect("resolve"), dir.join("resume_1.txt"));
    assert!(matches!(resolve_resume(dir, "resume_9"), Err(Error::NotFound(_))));
    assert!(matches!(resolve_resume(dir, "../secret"), Err(Error::BadRequest(_))));
    assert!(matches!(resolve_resume(dir, ""), Err(Error::BadRequest(_))));
    assert!(matches!(resolve_resume(dir, " resume_1 "), Err(Error::BadRequest(_))));
    assert!(matches!(resolve_resume(dir, "resume_1\n"), Err(Error::BadRequest(_))));
}

#[test]
fn config_file_overrides_defaults_and_resolves_relative_paths() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(
        f,
        r#"
[paths]
jobs_csv = "data/jobs.csv"
resumes_dir = "data/resumes"
artifacts_dir = "out"

[vectorizer]
max_features = 100
ngram_range = [1, 3]
min_df = 1
max_df = 0.8

[index]
top_k_default = 3
"#
    )
    .unwrap();

    let config = Config::load_from(&path).expect("config");
    let settings = config.settings().expect("settings");
    assert_eq!(settings.vectorizer.max_features, 100);
    assert_eq!(settings.vectorizer.ngram_range, (1, 3));
    assert_eq!(settings.vectorizer.min_df, DfThreshold::Count(1));
    assert_eq!(settings.vectorizer.max_df, DfThreshold::Proportion(0.8));
    assert_eq!(settings.index.top_k_default, 3);
    assert_eq!(settings.index.max_top_k, 50);
    assert_eq!(config.resolve(&settings.paths.artifacts_dir), tmp.path().join("out"));
    let top_k: usize = config.get("index.top_k_default").expect("get");
    assert_eq!(top_k, 3);
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    fs::write(&path, "[vectorizer]\nmax_features = 0\n").unwrap();
    assert!(matches!(Config::load_from(&path), Err(Error::InvalidConfig(_))));
    assert!(matches!(Config::load_from(&tmp.path().join("missing.toml")), Err(Error::InvalidConfig(_))));
}

#[test]
fn search_result_serializes_with_flat_keys() {
    let r = SearchResult {
        job_id: "1".into(),
        title: "Python Engineer".into(),
        company: "Acme".into(),
        location: "Remote".into(),
        score: 0.5,
    };
    let v = serde_json::to_value(&r).unwrap();
    for key in ["job_id", "title", "company", "location", "score"] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
}
