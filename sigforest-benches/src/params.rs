//! Benchmark parameter types rendered into Criterion benchmark ids.

use std::fmt;

/// Parameters for a key-set benchmark run.
#[derive(Clone, Debug)]
pub struct KeySetBenchParams {
    /// Number of distinct keys.
    pub key_count: usize,
    /// Number of merges applied.
    pub merge_count: usize,
}

impl fmt::Display for KeySetBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},merges={}", self.key_count, self.merge_count)
    }
}

/// Parameters for a connectivity search benchmark run.
#[derive(Clone, Debug)]
pub struct ConnectBenchParams {
    /// Number of necklaces in the census.
    pub census_size: usize,
    /// Target number of beads.
    pub target_len: usize,
}

impl fmt::Display for ConnectBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},len={}", self.census_size, self.target_len)
    }
}
