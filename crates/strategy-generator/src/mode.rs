//! Generation requests: how many random tuples and from which sources.

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which tuple sources a generation pass draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Directed tuples followed by random (or exhaustive) tuples
    #[default]
    All,
    /// Random (or exhaustive) tuples only
    RandomOnly,
    /// Directed tuples only
    DirectedOnly,
    /// Directed tuples if the vector always includes them, else random
    Mixed,
    /// Test tuples only
    Test,
}

impl GenerationMode {
    pub const ALL: [GenerationMode; 5] = [
        GenerationMode::All,
        GenerationMode::RandomOnly,
        GenerationMode::DirectedOnly,
        GenerationMode::Mixed,
        GenerationMode::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::All => "all",
            GenerationMode::RandomOnly => "random_only",
            GenerationMode::DirectedOnly => "directed_only",
            GenerationMode::Mixed => "mixed",
            GenerationMode::Test => "test",
        }
    }

    /// Whether directed tuples are emitted.
    pub fn includes_directed(&self, always_include_directed: bool) -> bool {
        match self {
            GenerationMode::All | GenerationMode::DirectedOnly => true,
            GenerationMode::Mixed => always_include_directed,
            GenerationMode::RandomOnly | GenerationMode::Test => false,
        }
    }

    /// Whether random or exhaustive tuples are emitted.
    pub fn includes_random(&self, always_include_directed: bool) -> bool {
        match self {
            GenerationMode::All | GenerationMode::RandomOnly => true,
            GenerationMode::Mixed => !always_include_directed,
            GenerationMode::DirectedOnly | GenerationMode::Test => false,
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = GenerationError;

    /// Accepts both `random_only` and `random-only` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        GenerationMode::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| GenerationError::InvalidSetting {
                kind: "mode",
                value: s.to_string(),
            })
    }
}

/// How many random tuples to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleCount {
    /// Exactly this many random tuples
    Count(usize),
    /// Enumerate the Cartesian product of sequence arguments
    Exhaustive,
}

impl Default for SampleCount {
    fn default() -> Self {
        SampleCount::Count(10)
    }
}

impl SampleCount {
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, SampleCount::Exhaustive)
    }

    /// The count, or zero when exhaustive.
    pub fn count(&self) -> usize {
        match self {
            SampleCount::Count(n) => *n,
            SampleCount::Exhaustive => 0,
        }
    }
}

impl fmt::Display for SampleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleCount::Count(n) => write!(f, "{n}"),
            SampleCount::Exhaustive => f.write_str("exhaustive"),
        }
    }
}

impl FromStr for SampleCount {
    type Err = GenerationError;

    /// Parses a non-negative integer, or `exhaustive`/`auto`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("exhaustive") || s.eq_ignore_ascii_case("auto") {
            return Ok(SampleCount::Exhaustive);
        }
        s.parse::<usize>()
            .map(SampleCount::Count)
            .map_err(|_| GenerationError::InvalidSetting {
                kind: "sample count",
                value: s.to_string(),
            })
    }
}

impl From<usize> for SampleCount {
    fn from(n: usize) -> Self {
        SampleCount::Count(n)
    }
}
