//! Engine configuration
//!
//! Settings come from `LEXIGRAPH_*` environment variables or from a YAML
//! file with the same keys in snake_case.
//!
//! | Variable                      | Default |
//! |-------------------------------|---------|
//! | `LEXIGRAPH_LEXICON_PATH`      | unset   |
//! | `LEXIGRAPH_PATH_MAX_DEPTH`    | 16      |
//! | `LEXIGRAPH_SEARCH_MAX_DEPTH`  | 64      |
//! | `LEXIGRAPH_PARALLEL`          | true    |

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::graph::{DEFAULT_PATH_MAX_DEPTH, DEFAULT_SEARCH_MAX_DEPTH};
use crate::lexicon::Lexicon;

pub const ENV_LEXICON_PATH: &str = "LEXIGRAPH_LEXICON_PATH";
pub const ENV_PATH_MAX_DEPTH: &str = "LEXIGRAPH_PATH_MAX_DEPTH";
pub const ENV_SEARCH_MAX_DEPTH: &str = "LEXIGRAPH_SEARCH_MAX_DEPTH";
pub const ENV_PARALLEL: &str = "LEXIGRAPH_PARALLEL";

/// Depth bounds applied to every query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Bound for hypernym path enumeration
    pub path_max_depth: usize,
    /// Bound for distance and common-ancestor search
    pub search_max_depth: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            path_max_depth: DEFAULT_PATH_MAX_DEPTH,
            search_max_depth: DEFAULT_SEARCH_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lexicon file (`.bin` envelope or bare `.json` document)
    pub lexicon_path: Option<PathBuf>,
    pub path_max_depth: usize,
    pub search_max_depth: usize,
    /// Evaluate batches on the rayon pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let limits = QueryLimits::default();
        Self {
            lexicon_path: None,
            path_max_depth: limits.path_max_depth,
            search_max_depth: limits.search_max_depth,
            parallel: true,
        }
    }
}

impl EngineConfig {
    /// Create config from `LEXIGRAPH_*` env vars, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup (env-like)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_LEXICON_PATH).filter(|p| !p.trim().is_empty()) {
            config.lexicon_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_PATH_MAX_DEPTH) {
            config.path_max_depth = parse_depth(ENV_PATH_MAX_DEPTH, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEARCH_MAX_DEPTH) {
            config.search_max_depth = parse_depth(ENV_SEARCH_MAX_DEPTH, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL) {
            config.parallel = parse_flag(ENV_PARALLEL, &raw)?;
        }

        Ok(config)
    }

    /// Load config from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        info!("Loading engine configuration from {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Depth bounds for the query service
    pub fn limits(&self) -> QueryLimits {
        QueryLimits {
            path_max_depth: self.path_max_depth,
            search_max_depth: self.search_max_depth,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.path_max_depth == 0 || self.search_max_depth == 0 {
            bail!("depth limits must be at least 1");
        }
        Ok(())
    }

    /// Load the configured lexicon file
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        let path = self
            .lexicon_path
            .as_deref()
            .ok_or_else(|| anyhow!("{} is not set", ENV_LEXICON_PATH))?;
        Lexicon::load_path(path).with_context(|| format!("Failed to load {}", path.display()))
    }
}

fn parse_depth(key: &str, raw: &str) -> Result<usize> {
    let depth: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got {:?}", key, raw))?;
    if depth == 0 {
        bail!("{} must be at least 1", key);
    }
    Ok(depth)
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", key, other),
    }
}

// =============================================================================
// Tests
// =============================================================================
