//! # Stats Module
//!
//! Reference extraction, histogram aggregation and the two report views.
//!
//! ## Pipeline
//!
//! ```text
//! invocations ──► extract_references ──► ReferenceHistogram ──► rank
//!                                               │
//!                                               └──► CountFrequencyHistogram ──► distribution
//! ```
//!
//! The full list of invocations is read before aggregation starts. An
//! [`Analysis`] is built once per run and not updated afterwards.

pub mod extractor;
pub mod histogram;
pub mod views;

pub use extractor::{extract_references, REFERENCE_MARKER};
pub use histogram::{CountFrequencyHistogram, ReferenceEntry, ReferenceHistogram};
pub use views::{
    display_name, distribution, normalization_factor, rank, DistributionOptions, FrequencyBarRow,
    RankedReferenceRow, TieBreak, DEFAULT_BAR_BUDGET, DEFAULT_MIN_BAR_LENGTH,
};

/// Result of aggregating every invocation in a build log.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Number of compiler invocations processed.
    pub invocations: usize,
    pub references: ReferenceHistogram,
    pub frequencies: CountFrequencyHistogram,
}

impl Analysis {
    /// Number of unique references
    pub fn unique_references(&self) -> usize {
        self.references.len()
    }
}

/// Extract references from every invocation and aggregate them.
pub fn analyze<I, S>(invocations: I) -> Analysis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut references = ReferenceHistogram::new();
    let mut count = 0;

    for invocation in invocations {
        let tokens = extract_references(invocation.as_ref());
        if tokens.is_empty() {
            tracing::trace!("invocation {} has no references", count);
        }
        references.accumulate(tokens);
        count += 1;
    }

    let frequencies = references.count_frequency();
    tracing::debug!(
        "aggregated {} invocations into {} unique references",
        count,
        references.len()
    );

    Analysis {
        invocations: count,
        references,
        frequencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_counts_occurrences() {
        let analysis = analyze([
            "csc /reference:A.dll /reference:B.dll /out:one.dll",
            "csc /reference:a.dll /reference:A.dll /out:two.dll",
            "csc /noconfig /out:three.dll",
        ]);

        assert_eq!(analysis.invocations, 3);
        assert_eq!(analysis.unique_references(), 2);
        assert_eq!(analysis.references.get("A.dll"), Some(3));
        assert_eq!(analysis.references.get("B.dll"), Some(1));
        assert_eq!(analysis.frequencies.get(3), Some(1));
        assert_eq!(analysis.frequencies.get(1), Some(1));
    }

    #[test]
    fn test_analyze_frequency_sum_matches_unique_count() {
        let analysis = analyze(vec![
            "x /reference:A /reference:B /reference:C".to_string(),
            "x /reference:A /reference:D".to_string(),
            "x /reference:B /reference:A".to_string(),
        ]);

        assert_eq!(
            analysis.frequencies.total_frequency(),
            analysis.unique_references() as u64
        );
    }

    #[test]
    fn test_analyze_empty_input() {
        let analysis = analyze(Vec::<String>::new());

        assert_eq!(analysis.invocations, 0);
        assert!(analysis.references.is_empty());
        assert!(rank(&analysis.references, None, TieBreak::Insertion).is_empty());
        assert!(distribution(&analysis.frequencies, DistributionOptions::default()).is_empty());
    }
}
