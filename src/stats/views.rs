//! # Report Views
//!
//! Turns the histograms into the ordered rows handed to a report sink:
//!
//! - [`rank`] produces the most-referenced assemblies, highest count first.
//! - [`distribution`] produces one scaled bar per count value.
//!
//! ## Tie order
//!
//! With [`TieBreak::Insertion`] names that share a count keep the order in
//! which they were first seen in the build log. That order depends on how the
//! build scheduled its projects, so two logs of the same build can list tied
//! names differently. [`TieBreak::Name`] sorts tied names alphabetically
//! instead.

use serde::Serialize;

use super::histogram::{CountFrequencyHistogram, ReferenceHistogram};

/// Widest bar, in marker characters, the distribution report may draw.
pub const DEFAULT_BAR_BUDGET: u64 = 50;

/// Bars of this length or shorter are dropped from the distribution report.
pub const DEFAULT_MIN_BAR_LENGTH: u64 = 1;

/// One line of the ranked report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedReferenceRow {
    /// File name of the referenced assembly, without quotes.
    pub name: String,
    pub count: u64,
}

/// One line of the distribution report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyBarRow {
    /// Number of references.
    pub count: u64,
    /// Scaled number of assemblies referenced `count` times.
    pub bar_length: u64,
}

impl FrequencyBarRow {
    /// Render the bar as `bar_length` copies of `marker`
    pub fn bar(&self, marker: char) -> String {
        std::iter::repeat(marker)
            .take(usize::try_from(self.bar_length).unwrap_or(usize::MAX))
            .collect()
    }
}

/// How names with equal counts are ordered in the ranked report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// First-seen order (matches the order references appear in the log).
    #[default]
    Insertion,
    /// Case-insensitive display name, ascending.
    Name,
}

/// Scaling parameters for [`distribution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionOptions {
    pub bar_budget: u64,
    pub min_bar_length: u64,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            bar_budget: DEFAULT_BAR_BUDGET,
            min_bar_length: DEFAULT_MIN_BAR_LENGTH,
        }
    }
}

/// Presentation name of a raw reference token: the last path component with
/// any double quotes removed.
pub fn display_name(raw: &str) -> String {
    let file_name = raw.rsplit(&['/', '\\'][..]).next().unwrap_or(raw);
    file_name.replace('"', "")
}

/// Order histogram entries by count (descending) and take the first `limit`
/// rows, or all of them when `limit` is `None`.
pub fn rank(
    histogram: &ReferenceHistogram,
    limit: Option<usize>,
    tie_break: TieBreak,
) -> Vec<RankedReferenceRow> {
    let mut rows: Vec<RankedReferenceRow> = histogram
        .iter()
        .map(|entry| RankedReferenceRow {
            name: display_name(&entry.name),
            count: entry.count,
        })
        .collect();

    // Stable sort keeps first-seen order within a count.
    match tie_break {
        TieBreak::Insertion => rows.sort_by(|a, b| b.count.cmp(&a.count)),
        TieBreak::Name => rows.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
    }

    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Scale the count/frequency histogram into bars no wider than the budget.
///
/// The normalization factor is `ceil(max_frequency / bar_budget)` and each bar
/// is `floor(frequency / factor)` long. Rows whose bar is not longer than
/// `min_bar_length` are dropped; the rest are ordered by count, descending.
pub fn distribution(
    frequencies: &CountFrequencyHistogram,
    options: DistributionOptions,
) -> Vec<FrequencyBarRow> {
    let Some(max_frequency) = frequencies.max_frequency() else {
        return Vec::new();
    };

    let factor = normalization_factor(max_frequency, options.bar_budget);

    let mut rows: Vec<FrequencyBarRow> = frequencies
        .iter()
        .map(|(count, frequency)| FrequencyBarRow {
            count,
            bar_length: frequency / factor,
        })
        .filter(|row| row.bar_length > options.min_bar_length)
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// `ceil(max_frequency / bar_budget)`, never less than 1.
pub fn normalization_factor(max_frequency: u64, bar_budget: u64) -> u64 {
    max_frequency.div_ceil(bar_budget.max(1)).max(1)
}
