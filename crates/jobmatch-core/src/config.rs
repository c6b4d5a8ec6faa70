//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` +
//! `config.<env>.toml` + `JOBMATCH_*` env vars (`__` separates sections, e.g.
//! `JOBMATCH_PATHS__ARTIFACTS_DIR`). Provides helpers to expand `~` and
//! `${VAR}` and to resolve relative paths against the config file's directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "JOBMATCH_";

/// Upper bound for `top_k` accepted from callers.
pub const MAX_TOP_K: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub jobs_csv: String,
    pub resumes_dir: String,
    pub artifacts_dir: String,
    pub reports_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            jobs_csv: "data/jobs.csv".to_string(),
            resumes_dir: "data/resumes".to_string(),
            artifacts_dir: "artifacts".to_string(),
            reports_dir: "artifacts".to_string(),
        }
    }
}

/// Document-frequency cutoff: an absolute document count or a proportion of
/// the corpus. TOML integers become `Count`, floats become `Proportion`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DfThreshold {
    Count(usize),
    Proportion(f64),
}

impl DfThreshold {
    /// Largest document frequency a term may have in a corpus of `n_docs`.
    pub fn max_count(self, n_docs: usize) -> usize {
        match self {
            Self::Count(c) => c,
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            Self::Proportion(p) => (p * n_docs as f64).floor() as usize,
        }
    }

    /// Smallest document frequency a term must have in a corpus of `n_docs`.
    pub fn min_count(self, n_docs: usize) -> usize {
        match self {
            Self::Count(c) => c,
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            Self::Proportion(p) => (p * n_docs as f64).ceil() as usize,
        }
    }

    fn validate(self, name: &str) -> Result<()> {
        if let Self::Proportion(p) = self {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidConfig(format!(
                    "vectorizer.{name} proportion must be within [0.0, 1.0], got {p}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    pub min_df: DfThreshold,
    pub max_df: DfThreshold,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            ngram_range: (1, 2),
            min_df: DfThreshold::Count(2),
            max_df: DfThreshold::Proportion(0.9),
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("vectorizer.max_features must be > 0".into()));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "vectorizer.ngram_range must satisfy 1 <= min_n <= max_n, got ({min_n}, {max_n})"
            )));
        }
        self.min_df.validate("min_df")?;
        self.max_df.validate("max_df")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub top_k_default: usize,
    pub max_top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { top_k_default: 5, max_top_k: MAX_TOP_K }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "127.0.0.1:8000".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathsConfig,
    pub vectorizer: VectorizerConfig,
    pub index: IndexConfig,
    pub server: ServerConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        let idx = &self.index;
        if idx.max_top_k == 0 || idx.max_top_k > MAX_TOP_K {
            return Err(Error::InvalidConfig(format!(
                "index.max_top_k must be within 1..={MAX_TOP_K}, got {}",
                idx.max_top_k
            )));
        }
        if idx.top_k_default == 0 || idx.top_k_default > idx.max_top_k {
            return Err(Error::InvalidConfig(format!(
                "index.top_k_default must be within 1..={}, got {}",
                idx.max_top_k, idx.top_k_default
            )));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load `config.toml` (+ the `RUST_ENV` overlay) from the working directory.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Self::defaults().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let base_dir = env::current_dir()?;
        tracing::debug!(env = %env_name, base = %base_dir.display(), "loaded configuration");
        let config = Self { figment, base_dir };
        config.settings()?;
        Ok(config)
    }

    /// Load an explicit settings file. Relative paths inside it resolve
    /// against the file's own directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InvalidConfig(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let figment = Self::defaults()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        let base_dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => env::current_dir()?,
        };
        tracing::debug!(path = %path.display(), "loaded configuration");
        let config = Self { figment, base_dir };
        config.settings()?;
        Ok(config)
    }

    /// `--config` if given, otherwise the working-directory lookup.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        }
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{key}': {e}")))
    }

    /// The fully typed, validated settings.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a configured path string against the config base directory.
    pub fn resolve<S: AsRef<str>>(&self, p: S) -> PathBuf {
        resolve_with_base(&self.base_dir, p)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
