use sigforest_core::KeyCodec;

use crate::{KeyFault, Necklace, NecklaceError, necklace::least_rotation};

/// Keys necklaces by their least rotation written as `0`/`1` characters.
///
/// Only canonical keys reconstruct, so the key of a reconstructed necklace
/// always equals the stored key.
///
/// # Examples
/// ```
/// use sigforest_core::KeyCodec;
/// use sigforest_providers_necklace::NecklaceCodec;
///
/// let necklace = NecklaceCodec.from_key("0011")?;
/// assert_eq!(NecklaceCodec.key_of(&necklace), "0011");
/// assert!(NecklaceCodec.from_key("0110").is_err());
/// # Ok::<(), sigforest_providers_necklace::NecklaceError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NecklaceCodec;

impl KeyCodec for NecklaceCodec {
    type Item = Necklace;
    type Error = NecklaceError;

    fn key_of(&self, item: &Necklace) -> String {
        item.to_string()
    }

    fn from_key(&self, key: &str) -> Result<Necklace, NecklaceError> {
        let invalid = |fault| NecklaceError::InvalidKey {
            key: key.to_owned(),
            fault,
        };

        let beads = key
            .chars()
            .enumerate()
            .map(|(position, found)| match found {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(invalid(KeyFault::InvalidBead { position, found })),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if beads.is_empty() {
            return Err(invalid(KeyFault::Empty));
        }
        if least_rotation(&beads) != 0 {
            return Err(invalid(KeyFault::NotCanonical));
        }
        Ok(Necklace::canonical(beads))
    }
}
