//! # Report Module
//!
//! Hands the ordered rows produced by [`crate::stats`] to an output sink.
//!
//! | Format | Sink |
//! |--------|------|
//! | Console tables | [`TextSink`] |
//! | JSON document | [`JsonSink`] |
//!
//! A [`Report`] holds everything a sink needs: the summary values, the
//! optional ranked rows and the distribution rows. Sinks only lay the data out.

pub mod json;
pub mod text;
pub mod top;

pub use json::JsonSink;
pub use text::{format_elapsed, TextSink};
pub use top::TopLimit;

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::stats::{distribution, rank, Analysis, FrequencyBarRow, RankedReferenceRow};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Rows and summary values for one rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub invocations: usize,
    pub unique_references: usize,
    /// `None` when the ranked report is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranked: Option<Vec<RankedReferenceRow>>,
    pub distribution: Vec<FrequencyBarRow>,
}

impl Report {
    /// Build the rows for an analysis.
    pub fn build(analysis: &Analysis, top: &TopLimit, config: &Config) -> Self {
        let ranked = top
            .shows_ranked()
            .then(|| rank(&analysis.references, top.limit(), config.tie_break()));

        Self {
            invocations: analysis.invocations,
            unique_references: analysis.unique_references(),
            ranked,
            distribution: distribution(&analysis.frequencies, config.distribution_options()),
        }
    }
}

/// Destination for a rendered [`Report`].
pub trait ReportSink {
    fn render(&mut self, report: &Report) -> Result<()>;
}
