use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use jobmatch_cli::server::{router, AppState};
use jobmatch_core::config::Config;
use jobmatch_index::TfidfJobIndex;

#[derive(Parser, Debug)]
#[command(name = "jobmatch-server", about = "HTTP API ranking jobs for free text or stored resumes")]
struct Cli {
    /// Settings file (defaults to ./config.toml plus the RUST_ENV overlay).
    #[arg(long, env = "JOBMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind (host:port); overrides `server.bind`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobmatch_cli::init_tracing();
    let cli = Cli::parse();
    let config = Config::load_optional(cli.config.as_deref()).context("loading configuration")?;
    let settings = config.settings()?;

    let artifacts_dir = config.resolve(&settings.paths.artifacts_dir);
    let index = TfidfJobIndex::load(&artifacts_dir)
        .with_context(|| format!("loading index from {}", artifacts_dir.display()))?;
    let state = AppState {
        index: Arc::new(index),
        resumes_dir: config.resolve(&settings.paths.resumes_dir),
        default_top_k: settings.index.top_k_default,
        max_top_k: settings.index.max_top_k,
    };

    let bind = cli.bind.unwrap_or(settings.server.bind);
    let addr: SocketAddr = bind.parse().with_context(|| format!("invalid bind address {bind}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, documents = state.index.len(), "jobmatch-server listening");
    axum::serve(listener, router(state)).await.context("server shutdown")?;
    Ok(())
}
