use std::fmt;

use sigforest_core::KeyCodec;

/// Upper-case word items; keys are the words themselves and anything with a
/// lower-case letter is rejected on reconstruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct Words;

#[derive(Debug)]
pub struct NotUppercase;

impl fmt::Display for NotUppercase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key contains lower-case letters")
    }
}

impl std::error::Error for NotUppercase {}

impl KeyCodec for Words {
    type Item = String;
    type Error = NotUppercase;

    fn key_of(&self, item: &String) -> String {
        item.clone()
    }

    fn from_key(&self, key: &str) -> Result<String, NotUppercase> {
        if key.chars().any(char::is_lowercase) {
            return Err(NotUppercase);
        }
        Ok(key.to_owned())
    }
}

#[must_use]
pub fn word(text: &str) -> String {
    text.to_owned()
}
