use std::{cmp::Ordering, fmt};

use crate::NecklaceError;

/// Non-empty cyclic binary word, kept in its least rotation.
///
/// Positions passed to the editing methods index [`Necklace::beads`] and wrap
/// around, so every position is valid.
///
/// # Examples
/// ```
/// use sigforest_providers_necklace::Necklace;
///
/// let necklace = Necklace::new([true, false, true, false, false])?;
/// assert_eq!(necklace.to_string(), "00101");
/// assert_eq!(necklace.ones(), 2);
/// # Ok::<(), sigforest_providers_necklace::NecklaceError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Necklace {
    beads: Vec<bool>,
}

impl Necklace {
    /// Builds the necklace containing `beads` in cyclic order.
    ///
    /// # Errors
    /// Returns [`NecklaceError::Empty`] when `beads` yields nothing.
    pub fn new(beads: impl IntoIterator<Item = bool>) -> Result<Self, NecklaceError> {
        let beads: Vec<bool> = beads.into_iter().collect();
        if beads.is_empty() {
            return Err(NecklaceError::Empty);
        }
        Ok(Self::canonical(beads))
    }

    /// Rotates `beads` to their lexicographically least rotation.
    ///
    /// `beads` must not be empty.
    pub(crate) fn canonical(mut beads: Vec<bool>) -> Self {
        let shift = least_rotation(&beads);
        beads.rotate_left(shift);
        Self { beads }
    }

    /// Returns the beads of the least rotation.
    #[must_use]
    pub fn beads(&self) -> &[bool] {
        &self.beads
    }

    /// Number of beads.
    #[expect(clippy::len_without_is_empty, reason = "necklaces are never empty")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.beads.len()
    }

    /// Number of `1` beads.
    #[must_use]
    pub fn ones(&self) -> usize {
        self.beads.iter().filter(|bead| **bead).count()
    }

    /// Number of `0` beads.
    #[must_use]
    pub fn zeros(&self) -> usize {
        self.len() - self.ones()
    }

    /// Inserts `bead` in front of position `pos`; `pos == len()` appends.
    pub fn insert(&mut self, pos: usize, bead: bool) {
        let at = pos % (self.len() + 1);
        self.beads.insert(at, bead);
        self.normalise();
    }

    /// Removes the bead at `pos` and returns it.
    ///
    /// Returns `None` and leaves the necklace unchanged when it holds a single
    /// bead.
    pub fn remove(&mut self, pos: usize) -> Option<bool> {
        if self.len() == 1 {
            return None;
        }
        let bead = self.beads.remove(pos % self.len());
        self.normalise();
        Some(bead)
    }

    /// Exchanges the bead at `pos` with its cyclic successor.
    ///
    /// Returns `false`, leaving the necklace unchanged, when both beads are
    /// equal.
    pub fn swap(&mut self, pos: usize) -> bool {
        let len = self.len();
        let at = pos % len;
        let next = (at + 1) % len;
        if self.beads.get(at) == self.beads.get(next) {
            return false;
        }
        self.beads.swap(at, next);
        self.normalise();
        true
    }

    /// Positions holding `bead`.
    pub(crate) fn positions_of(&self, bead: bool) -> Vec<usize> {
        self.beads
            .iter()
            .enumerate()
            .filter_map(|(pos, value)| (*value == bead).then_some(pos))
            .collect()
    }

    /// Positions whose bead differs from its cyclic successor.
    pub(crate) fn swappable(&self) -> Vec<usize> {
        let len = self.len();
        (0..len)
            .filter(|pos| self.beads.get(*pos) != self.beads.get((pos + 1) % len))
            .collect()
    }

    fn normalise(&mut self) {
        let shift = least_rotation(&self.beads);
        self.beads.rotate_left(shift);
    }
}

impl fmt::Display for Necklace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bead in &self.beads {
            f.write_str(if *bead { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Smallest shift whose rotation of `beads` is lexicographically least.
pub(crate) fn least_rotation(beads: &[bool]) -> usize {
    (1..beads.len()).fold(0, |best, shift| {
        if compare_rotations(beads, shift, best) == Ordering::Less {
            shift
        } else {
            best
        }
    })
}

fn compare_rotations(beads: &[bool], left: usize, right: usize) -> Ordering {
    let len = beads.len();
    let rotation = |shift: usize| beads.iter().cycle().skip(shift).take(len);
    rotation(left).cmp(rotation(right))
}
