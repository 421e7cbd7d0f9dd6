//! # Reference Histograms
//!
//! [`ReferenceHistogram`] counts reference tokens by assembly name and
//! [`CountFrequencyHistogram`] counts how many names share each count.
//!
//! Both maps keep insertion order. The ranked report flattens equal counts in
//! that order, so the order in which names were first seen is observable.

use indexmap::IndexMap;
use serde::Serialize;

/// A single assembly name and the number of times it was referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    /// The raw token, in the casing of its first occurrence.
    pub name: String,
    /// Number of reference tokens that matched this name (always >= 1).
    pub count: u64,
}

/// Case-insensitive `name -> count` map built from reference tokens.
#[derive(Debug, Clone, Default)]
pub struct ReferenceHistogram {
    /// Keyed by the case-folded name.
    entries: IndexMap<String, ReferenceEntry>,
}

impl ReferenceHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every token. Repeated tokens, including repeats from the same
    /// invocation, increment the count once per occurrence.
    pub fn accumulate<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.record(token.as_ref());
        }
    }

    /// Record a single token
    pub fn record(&mut self, token: &str) {
        self.entries
            .entry(fold_case(token))
            .and_modify(|entry| entry.count += 1)
            .or_insert_with(|| ReferenceEntry {
                name: token.to_string(),
                count: 1,
            });
    }

    /// Number of unique names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the count for a name, ignoring case.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries.get(&fold_case(name)).map(|entry| entry.count)
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceEntry> {
        self.entries.values()
    }

    /// Derive the `count -> frequency` histogram.
    pub fn count_frequency(&self) -> CountFrequencyHistogram {
        let mut frequencies = CountFrequencyHistogram::new();
        for entry in self.iter() {
            frequencies.record(entry.count);
        }
        frequencies
    }
}

impl<S: AsRef<str>> FromIterator<S> for ReferenceHistogram {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut histogram = Self::new();
        histogram.accumulate(iter);
        histogram
    }
}

/// `count -> frequency` map: how many distinct names were referenced `count` times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountFrequencyHistogram {
    frequencies: IndexMap<u64, u64>,
}

impl CountFrequencyHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the frequency of `count` by one.
    pub fn record(&mut self, count: u64) {
        *self.frequencies.entry(count).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Frequency recorded for a count value
    pub fn get(&self, count: u64) -> Option<u64> {
        self.frequencies.get(&count).copied()
    }

    /// Iterate `(count, frequency)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.frequencies
            .iter()
            .map(|(&count, &frequency)| (count, frequency))
    }

    /// Largest frequency present, `None` when empty.
    pub fn max_frequency(&self) -> Option<u64> {
        self.frequencies.values().copied().max()
    }

    /// Sum of all frequencies. Equals the number of unique names in the
    /// [`ReferenceHistogram`] this was derived from.
    pub fn total_frequency(&self) -> u64 {
        self.frequencies.values().sum()
    }
}

/// Build from `(count, frequency)` pairs. Pairs with a zero frequency are
/// skipped and repeated counts are summed.
impl FromIterator<(u64, u64)> for CountFrequencyHistogram {
    fn from_iter<T: IntoIterator<Item = (u64, u64)>>(iter: T) -> Self {
        let mut histogram = Self::new();
        for (count, frequency) in iter {
            if frequency > 0 {
                *histogram.frequencies.entry(count).or_insert(0) += frequency;
            }
        }
        histogram
    }
}

/// Ordinal case folding used for name comparison. Each character maps to at
/// most one character; characters whose uppercase form expands (`ß`) are kept.
fn fold_case(name: &str) -> String {
    name.chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}
