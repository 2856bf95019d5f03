//! Common domain type definitions
//!
//! This module contains the small classifier types shared by the observation
//! and capacity models.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sex breakdown of an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    /// Male population
    Male,
    /// Female population
    Female,
    /// Both sexes combined
    Both,
    /// Not specified in the source
    Unset,
}

impl Sex {
    /// Label used in reports and chart data
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Both => "Both",
            Self::Unset => "Unset",
        }
    }

    /// Whether rows with this sex belong to the headline (all-population) slice
    #[must_use]
    pub const fn is_headline(self) -> bool {
        matches!(self, Self::Both | Self::Unset)
    }
}

impl From<&str> for Sex {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "males" => Self::Male,
            "f" | "female" | "females" => Self::Female,
            "both" | "both sexes" | "all" => Self::Both,
            _ => Self::Unset,
        }
    }
}

impl From<Option<&str>> for Sex {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Unset, Self::from)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sort key for age-band labels such as `"<5 years"`, `"5-9 years"` or `"80+ years"`
///
/// Bands are ordered by their leading number. Labels without one (`"All ages"`,
/// `"Age-standardized"`) come after every numbered band, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBand<'a> {
    start: Option<u32>,
    label: &'a str,
}

impl<'a> AgeBand<'a> {
    #[must_use]
    pub fn new(label: &'a str) -> Self {
        // "<5 years" starts at zero
        let start = if label.trim_start().starts_with('<') {
            Some(0)
        } else {
            let digits: String = label
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        };
        Self { start, label }
    }

    /// Lower bound of the band in years, when the label carries one
    #[must_use]
    pub const fn start(&self) -> Option<u32> {
        self.start
    }
}

impl Ord for AgeBand<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.start, other.start) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.label.cmp(other.label)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(other.label),
        }
    }
}

impl PartialOrd for AgeBand<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
