//! Query services on top of a fitted job index: the HTTP API and the batch
//! resume report.

use jobmatch_core::error::{Error, Result};

pub mod report;
pub mod server;

/// Accept `top_k` only within `1..=max_top_k`.
pub fn check_top_k(top_k: usize, max_top_k: usize) -> Result<usize> {
    if (1..=max_top_k).contains(&top_k) {
        Ok(top_k)
    } else {
        Err(Error::BadRequest(format!("top_k must be between 1 and {max_top_k}")))
    }
}

/// Install the fmt subscriber used by every binary. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
