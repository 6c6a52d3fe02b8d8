//! TOML configuration for the feed compiler.
//!
//! Every section is optional. Relative paths in a configuration file are
//! resolved against the directory holding that file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use feed_model::{FeedLabels, FeedOptions, ShopInfo};

use crate::cli::SourceArgs;

/// Feed file written by `watch` when no output path is configured.
pub const DEFAULT_OUTPUT: &str = "prom_feed.yml";

/// Refresh interval used when none is configured: four hours.
pub const DEFAULT_INTERVAL_SECS: u64 = 4 * 60 * 60;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub source: SourceSection,
    pub output: OutputSection,
    pub refresh: RefreshSection,
    pub shop: ShopInfo,
    pub labels: FeedLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Primary-language sheet export.
    pub primary: Option<PathBuf>,
    /// Secondary-language sheet export.
    pub secondary: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSection {
    pub interval_secs: u64,
}

impl Default for RefreshSection {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl FeedConfig {
    /// Load the configuration file at `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replace configured locations with the ones given on the command line.
    #[must_use]
    pub fn with_overrides(mut self, args: &SourceArgs) -> Self {
        if let Some(primary) = &args.primary {
            self.source.primary = Some(primary.clone());
        }
        if let Some(secondary) = &args.secondary {
            self.source.secondary = Some(secondary.clone());
        }
        if let Some(output) = &args.output {
            self.output.path = Some(output.clone());
        }
        self
    }

    pub fn feed_options(&self) -> FeedOptions {
        FeedOptions {
            shop: self.shop.clone(),
            labels: self.labels.clone(),
        }
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.source.primary,
            &mut self.source.secondary,
            &mut self.output.path,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
