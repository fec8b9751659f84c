use thiserror::Error;

/// Why a string is not a necklace key.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum KeyFault {
    #[error("key is empty")]
    Empty,
    #[error("unexpected character {found:?} at position {position}")]
    InvalidBead { position: usize, found: char },
    #[error("key is not the least rotation of its necklace")]
    NotCanonical,
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NecklaceError {
    #[error("necklace must contain at least one bead")]
    Empty,
    #[error("invalid necklace key `{key}`: {fault}")]
    InvalidKey { key: String, fault: KeyFault },
    #[error("cannot place {ones} ones on a necklace of {len} beads")]
    InvalidTarget { ones: usize, len: usize },
    #[error("length bounds {lower}..={upper} exclude target length {len}")]
    InvalidBounds {
        lower: usize,
        upper: usize,
        len: usize,
    },
    #[error("swap threshold must lie in [0, 1] (got {got})")]
    InvalidThreshold { got: f64 },
    #[error("no move applies to necklace `{necklace}`")]
    Stuck { necklace: String },
    #[error("walk stopped after {steps} steps at `{necklace}`")]
    StepLimit { steps: u64, necklace: String },
}
