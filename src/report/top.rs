//! # Top Limit
//!
//! Interprets the `--top` option, which turns on the ranked report and caps its rows.

/// Value of the `--top` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLimit {
    /// Option not given: distribution report only.
    Disabled,
    /// Ranked report limited to the first `n` assemblies.
    Count(usize),
    /// `*`: ranked report with every assembly.
    All,
    /// Anything else. Treated like [`TopLimit::Disabled`].
    Invalid(String),
}

impl TopLimit {
    /// Interpret the raw `--top` argument. Surrounding whitespace is ignored.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::Disabled;
        };

        let trimmed = raw.trim();
        if trimmed == "*" {
            return Self::All;
        }

        match trimmed.parse::<usize>() {
            Ok(n) => Self::Count(n),
            Err(_) => {
                tracing::warn!(
                    "Ignoring --top value '{}': expected a non-negative number or '*'",
                    raw
                );
                Self::Invalid(raw.to_string())
            }
        }
    }

    /// Whether the ranked report is shown at all
    pub fn shows_ranked(&self) -> bool {
        matches!(self, Self::Count(_) | Self::All)
    }

    /// Row limit for the ranked report (`None` means unlimited).
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }
}
