use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jobmatch_core::config::Config;
use jobmatch_core::corpus::{build_corpus, read_jobs_csv};
use jobmatch_index::TfidfJobIndex;

#[derive(Parser, Debug)]
#[command(name = "jobmatch-build", about = "Fit the TF-IDF job index and write its artifacts")]
struct Cli {
    /// Settings file (defaults to ./config.toml plus the RUST_ENV overlay).
    #[arg(long, env = "JOBMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Jobs CSV; overrides `paths.jobs_csv`.
    #[arg(long)]
    jobs: Option<PathBuf>,

    /// Artifacts directory; overrides `paths.artifacts_dir`.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    jobmatch_cli::init_tracing();
    let cli = Cli::parse();
    let config = Config::load_optional(cli.config.as_deref()).context("loading configuration")?;
    let settings = config.settings()?;

    let jobs_path = cli.jobs.unwrap_or_else(|| config.resolve(&settings.paths.jobs_csv));
    let out_dir = cli.out.unwrap_or_else(|| config.resolve(&settings.paths.artifacts_dir));
    println!("jobmatch-build\n==============");
    println!("Jobs table: {}", jobs_path.display());

    let jobs = read_jobs_csv(&jobs_path).with_context(|| format!("reading {}", jobs_path.display()))?;
    let (docs, meta) = build_corpus(&jobs);
    let index = TfidfJobIndex::fit(&docs, meta, &settings.vectorizer)?;
    index.save(&out_dir)?;

    println!("\n✅ Indexed {} jobs ({} terms)", index.len(), index.vocabulary_size());
    println!("📁 Artifacts written to {}", out_dir.display());
    Ok(())
}
