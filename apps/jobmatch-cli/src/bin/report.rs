use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use jobmatch_cli::check_top_k;
use jobmatch_cli::report::{score_all, write_reports};
use jobmatch_core::config::Config;
use jobmatch_core::corpus::list_resumes;
use jobmatch_index::TfidfJobIndex;

#[derive(Parser, Debug)]
#[command(name = "jobmatch-report", about = "Rank jobs for every resume and write CSV/Markdown reports")]
struct Cli {
    /// Settings file (defaults to ./config.toml plus the RUST_ENV overlay).
    #[arg(long, env = "JOBMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Matches per resume; defaults to `index.top_k_default`.
    #[arg(long)]
    top_k: Option<usize>,

    /// Report directory; overrides `paths.reports_dir`.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    jobmatch_cli::init_tracing();
    let cli = Cli::parse();
    let config = Config::load_optional(cli.config.as_deref()).context("loading configuration")?;
    let settings = config.settings()?;

    let artifacts_dir = config.resolve(&settings.paths.artifacts_dir);
    let resumes_dir = config.resolve(&settings.paths.resumes_dir);
    let out_dir = cli.out.unwrap_or_else(|| config.resolve(&settings.paths.reports_dir));
    let top_k = check_top_k(cli.top_k.unwrap_or(settings.index.top_k_default), settings.index.max_top_k)?;

    let index = TfidfJobIndex::load(&artifacts_dir)
        .with_context(|| format!("loading index from {}", artifacts_dir.display()))?;
    let resumes = list_resumes(&resumes_dir)?;
    println!("jobmatch-report\n===============");
    println!("Scoring {} resumes against {} jobs (top {top_k})", resumes.len(), index.len());

    let pb = ProgressBar::new(resumes.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let rows = score_all(&index, &resumes, top_k, |resume| {
        pb.set_message(resume.resume_id.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    let (csv_path, md_path) = write_reports(&out_dir, &rows)?;
    println!("\n✅ Wrote reports to: {} and {}", csv_path.display(), md_path.display());
    Ok(())
}
