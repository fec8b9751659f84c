//! Seeded synthetic key sets for benchmarking.
//!
//! Keys are generated eagerly from a [`SmallRng`] so every benchmark run sees
//! the same census and the same merge schedule.

use std::convert::Infallible;

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use sigforest_core::KeyCodec;
use sigforest_providers_necklace::Necklace;

/// Errors that may occur during synthetic key generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested key count was zero.
    #[error("key count must be greater than zero")]
    ZeroKeys,
    /// The requested necklace length was zero.
    #[error("necklace length must be greater than zero")]
    ZeroLength,
}

/// Configuration for synthetic key generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of keys to generate.
    pub key_count: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Codec whose items are the keys themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenCodec;

impl KeyCodec for TokenCodec {
    type Item = String;
    type Error = Infallible;

    fn key_of(&self, item: &String) -> String {
        item.clone()
    }

    fn from_key(&self, key: &str) -> Result<String, Infallible> {
        Ok(key.to_owned())
    }
}

/// Distinct keys in a shuffled order, plus a merge schedule over them.
///
/// # Examples
///
/// ```
/// use sigforest_benches::source::{SyntheticConfig, SyntheticKeys};
///
/// let config = SyntheticConfig { key_count: 10, seed: 42 };
/// let keys = SyntheticKeys::generate(&config).expect("valid config");
/// assert_eq!(keys.keys().len(), 10);
/// assert_eq!(keys.merge_schedule(5).len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticKeys {
    keys: Vec<String>,
    seed: u64,
}

impl SyntheticKeys {
    /// Generates `key_count` distinct keys.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroKeys`] if `key_count` is zero.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.key_count == 0 {
            return Err(SyntheticError::ZeroKeys);
        }
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut keys: Vec<String> = (0..config.key_count)
            .map(|index| format!("k{index:08}"))
            .collect();
        keys.shuffle(&mut rng);
        Ok(Self {
            keys,
            seed: config.seed,
        })
    }

    /// Returns the keys in generation order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Renders the keys as a newline-separated census.
    #[must_use]
    pub fn census(&self) -> String {
        self.keys.join("\n")
    }

    /// Draws `count` random key pairs to merge.
    #[must_use]
    pub fn merge_schedule(&self, count: usize) -> Vec<(String, String)> {
        let mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(1));
        (0..count)
            .filter_map(|_| {
                let left = self.keys.choose(&mut rng)?;
                let right = self.keys.choose(&mut rng)?;
                Some((left.clone(), right.clone()))
            })
            .collect()
    }
}

/// Generates `config.key_count` random necklace keys of up to `max_len`
/// beads. Duplicates are kept; loading resolves them.
///
/// # Errors
///
/// Returns [`SyntheticError::ZeroKeys`] or [`SyntheticError::ZeroLength`]
/// when the matching parameter is zero.
pub fn necklace_census(
    config: &SyntheticConfig,
    max_len: usize,
) -> Result<Vec<String>, SyntheticError> {
    if config.key_count == 0 {
        return Err(SyntheticError::ZeroKeys);
    }
    if max_len == 0 {
        return Err(SyntheticError::ZeroLength);
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let keys = (0..config.key_count)
        .filter_map(|_| {
            let len = rng.gen_range(1..=max_len);
            let beads: Vec<bool> = (0..len).map(|_| rng.gen_bool(0.5)).collect();
            Necklace::new(beads).ok().map(|necklace| necklace.to_string())
        })
        .collect();
    Ok(keys)
}
