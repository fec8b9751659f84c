//! Biased random walk between necklaces.
//!
//! Each step applies one local edit chosen by [`NecklaceWalk::perform`]:
//!
//! 1. fix the number of ones first, inserting or removing a `1`;
//! 2. otherwise, above the swap threshold, shuffle a `01` pair;
//! 3. shrink by removing a `0` with probability `1 - beta`, where `beta` is
//!    the logistic penalty for drifting from the phase balance;
//! 4. grow by inserting a `0` while below the upper bound, else fall back to
//!    the size-preserving and shrinking edits;
//! 5. as a last resort insert a `0`.
//!
//! A walk ends once the necklace has the target number of ones and beads.

use rand::{Rng, rngs::SmallRng, seq::SliceRandom};
use sigforest_core::{PhaseParams, RandomWalk};
use tracing::trace;

use crate::{Necklace, NecklaceError};

const DEFAULT_SWAP_THRESHOLD: f64 = 0.1;
const DEFAULT_LOWER_BOUND: usize = 0;
const DEFAULT_UPPER_BOUND: usize = 9_999;

/// Configures and constructs [`NecklaceWalk`] instances.
///
/// # Examples
/// ```
/// use sigforest_providers_necklace::NecklaceWalkBuilder;
///
/// let walk = NecklaceWalkBuilder::new(2, 6)
///     .with_swap_threshold(0.25)
///     .build()?;
/// assert_eq!(walk.target_ones(), 2);
/// assert_eq!(walk.target_len(), 6);
/// # Ok::<(), sigforest_providers_necklace::NecklaceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NecklaceWalkBuilder {
    target_ones: usize,
    target_len: usize,
    swap_threshold: f64,
    lower_bound: usize,
    upper_bound: usize,
}

impl NecklaceWalkBuilder {
    /// Starts a builder aiming for necklaces with `target_ones` ones among
    /// `target_len` beads.
    #[must_use]
    pub fn new(target_ones: usize, target_len: usize) -> Self {
        Self {
            target_ones,
            target_len,
            swap_threshold: DEFAULT_SWAP_THRESHOLD,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
        }
    }

    /// Sets the probability below which a step skips the swap edit.
    #[must_use]
    pub fn with_swap_threshold(mut self, threshold: f64) -> Self {
        self.swap_threshold = threshold;
        self
    }

    /// Sets the length below which swaps and shrinking edits are not tried.
    ///
    /// A lower bound at or above the target length replaces it as the length
    /// the walk aims for.
    #[must_use]
    pub fn with_lower_bound(mut self, bound: usize) -> Self {
        self.lower_bound = bound;
        self
    }

    /// Sets the length the walk never grows beyond.
    #[must_use]
    pub fn with_upper_bound(mut self, bound: usize) -> Self {
        self.upper_bound = bound;
        self
    }

    /// Validates the configuration and constructs a [`NecklaceWalk`].
    ///
    /// # Errors
    /// Returns [`NecklaceError::InvalidTarget`] when the target length is
    /// zero or smaller than the target number of ones,
    /// [`NecklaceError::InvalidBounds`] when the bounds exclude the length
    /// the walk aims for, and [`NecklaceError::InvalidThreshold`] when the
    /// swap threshold is outside `[0, 1]`.
    pub fn build(self) -> Result<NecklaceWalk, NecklaceError> {
        if self.target_len == 0 || self.target_ones > self.target_len {
            return Err(NecklaceError::InvalidTarget {
                ones: self.target_ones,
                len: self.target_len,
            });
        }
        let goal_len = self.target_len.max(self.lower_bound);
        if goal_len > self.upper_bound {
            return Err(NecklaceError::InvalidBounds {
                lower: self.lower_bound,
                upper: self.upper_bound,
                len: self.target_len,
            });
        }
        if !(0.0..=1.0).contains(&self.swap_threshold) {
            return Err(NecklaceError::InvalidThreshold {
                got: self.swap_threshold,
            });
        }
        Ok(NecklaceWalk {
            target_ones: self.target_ones,
            target_len: self.target_len,
            goal_len,
            swap_threshold: self.swap_threshold,
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
        })
    }
}

/// Random walk steering necklaces towards a target shape.
#[derive(Debug, Clone)]
pub struct NecklaceWalk {
    target_ones: usize,
    target_len: usize,
    goal_len: usize,
    swap_threshold: f64,
    lower_bound: usize,
    upper_bound: usize,
}

impl NecklaceWalk {
    /// Number of ones in the target necklace.
    #[must_use]
    pub fn target_ones(&self) -> usize {
        self.target_ones
    }

    /// Length of the target necklace, before the lower bound applies.
    #[must_use]
    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Returns whether `necklace` is where walks stop.
    #[must_use]
    pub fn is_target(&self, necklace: &Necklace) -> bool {
        necklace.ones() == self.target_ones && necklace.len() == self.goal_len
    }

    /// Applies one edit to `necklace`, returning `false` when none applies.
    ///
    /// `beta` is the probability of keeping the necklace from shrinking.
    pub fn perform(&self, necklace: &mut Necklace, beta: f64, rng: &mut SmallRng) -> bool {
        let ones = necklace.ones();
        if ones < self.target_ones {
            let pos = rng.gen_range(0..=necklace.len());
            necklace.insert(pos, true);
            return true;
        }
        if ones > self.target_ones && remove_bead(necklace, true, rng) {
            return true;
        }

        let above_lower = necklace.len() >= self.lower_bound;
        if rng.gen_range(0.0..1.0) > self.swap_threshold && above_lower && swap_pair(necklace, rng)
        {
            return true;
        }
        if rng.gen_range(0.0..1.0) > beta && above_lower && remove_bead(necklace, false, rng) {
            return true;
        }

        if necklace.len() + 2 <= self.upper_bound {
            let pos = rng.gen_range(0..=necklace.len());
            necklace.insert(pos, false);
            return true;
        }
        if swap_pair(necklace, rng) || remove_bead(necklace, false, rng) {
            return true;
        }

        if necklace.len() < self.upper_bound {
            let pos = rng.gen_range(0..=necklace.len());
            necklace.insert(pos, false);
            return true;
        }
        false
    }
}

impl RandomWalk for NecklaceWalk {
    type Item = Necklace;
    type Error = NecklaceError;

    fn walk(
        &self,
        item: &mut Necklace,
        phase: &PhaseParams,
        rng: &mut SmallRng,
    ) -> Result<(), NecklaceError> {
        let limit = phase.step_limit().max(1);
        for _ in 0..limit {
            let beta = penalty(item.len(), phase);
            if !self.perform(item, beta, rng) {
                return Err(NecklaceError::Stuck {
                    necklace: item.to_string(),
                });
            }
            if self.is_target(item) {
                trace!(necklace = %item, "walk reached target");
                return Ok(());
            }
        }
        Err(NecklaceError::StepLimit {
            steps: limit,
            necklace: item.to_string(),
        })
    }
}

/// Logistic penalty for a necklace of `len` beads drifting from the balance.
fn penalty(len: usize, phase: &PhaseParams) -> f64 {
    let drift = phase.balance() as f64 - len as f64;
    let weight = (phase.scaling() * drift).exp();
    if weight.is_infinite() {
        1.0
    } else {
        weight / (1.0 + weight)
    }
}

fn remove_bead(necklace: &mut Necklace, bead: bool, rng: &mut SmallRng) -> bool {
    match necklace.positions_of(bead).choose(rng) {
        Some(&pos) => necklace.remove(pos).is_some(),
        None => false,
    }
}

fn swap_pair(necklace: &mut Necklace, rng: &mut SmallRng) -> bool {
    match necklace.swappable().choose(rng) {
        Some(&pos) => necklace.swap(pos),
        None => false,
    }
}
