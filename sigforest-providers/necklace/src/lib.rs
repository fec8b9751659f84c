//! Binary necklaces as a self-contained item domain for `sigforest`.
//!
//! A [`Necklace`] is a cyclic word over `0` and `1`, stored as its least
//! rotation. [`NecklaceCodec`] keys necklaces by that rotation and
//! [`NecklaceWalk`] moves between them with local bead edits, steering
//! towards a target bead count.

mod codec;
mod errors;
mod necklace;
mod walk;

pub use codec::NecklaceCodec;
pub use errors::{KeyFault, NecklaceError};
pub use necklace::Necklace;
pub use walk::{NecklaceWalk, NecklaceWalkBuilder};

#[cfg(test)]
mod tests;
