//! # Configuration
//!
//! Reads user configuration from `~/.config/buildref/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is deserialized from a JSON file in
//! the user's XDG config directory, or from a file passed with `--config`.
//! Every field has a default, so an empty object (or no file at all) gives the
//! stock report layout.
//!
//! ## Example
//!
//! ```json
//! {
//!   "bar_budget": 50,
//!   "min_bar_length": 1,
//!   "bar_marker": "*",
//!   "sort_ties_by_name": false,
//!   "compiler_names": ["fsc"]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::log::DEFAULT_COMPILERS;
use crate::stats::{DistributionOptions, TieBreak, DEFAULT_BAR_BUDGET, DEFAULT_MIN_BAR_LENGTH};

/// User configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Widest bar of the distribution report, in characters.
    #[serde(default = "default_bar_budget")]
    pub bar_budget: u64,

    /// Bars of this length or shorter are left out of the distribution report.
    #[serde(default = "default_min_bar_length")]
    pub min_bar_length: u64,

    /// Character used to draw distribution bars.
    #[serde(default = "default_bar_marker")]
    pub bar_marker: char,

    /// Sort assemblies with equal counts by name instead of log order.
    #[serde(default)]
    pub sort_ties_by_name: bool,

    /// Extra compiler executables to recognise, in addition to `csc` and `vbc`.
    #[serde(default)]
    pub compiler_names: Vec<String>,
}

fn default_bar_budget() -> u64 {
    DEFAULT_BAR_BUDGET
}

fn default_min_bar_length() -> u64 {
    DEFAULT_MIN_BAR_LENGTH
}

fn default_bar_marker() -> char {
    '*'
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bar_budget: default_bar_budget(),
            min_bar_length: default_min_bar_length(),
            bar_marker: default_bar_marker(),
            sort_ties_by_name: false,
            compiler_names: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default location. Returns
    /// `Config::default()` if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring user configuration: {:#}", e);
                Self::default()
            }
        }
    }

    /// Try to load configuration, returning an error on failure.
    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "buildref")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Scaling parameters for the distribution report
    pub fn distribution_options(&self) -> DistributionOptions {
        DistributionOptions {
            bar_budget: self.bar_budget,
            min_bar_length: self.min_bar_length,
        }
    }

    pub fn tie_break(&self) -> TieBreak {
        if self.sort_ties_by_name {
            TieBreak::Name
        } else {
            TieBreak::Insertion
        }
    }

    /// Built-in compiler names followed by the configured extras.
    pub fn compilers(&self) -> Vec<String> {
        let mut compilers: Vec<String> =
            DEFAULT_COMPILERS.iter().map(|c| (*c).to_string()).collect();
        for name in &self.compiler_names {
            if !compilers.iter().any(|c| c.eq_ignore_ascii_case(name)) {
                compilers.push(name.clone());
            }
        }
        compilers
    }
}
