//! Key derivation and reconstruction for the items grouped by a
//! [`crate::KeyedDisjointSet`].

use std::error::Error as StdError;

/// Converts items to canonical string keys and back.
///
/// The set treats key equality as ground truth for item identity, so
/// [`KeyCodec::key_of`] must be pure, deterministic and canonical: two items
/// are "the same" exactly when their keys are equal. [`KeyCodec::from_key`] is
/// only called lazily, when a representative or item is materialised, and is
/// the single place where malformed keys are detected.
///
/// # Examples
/// ```
/// use sigforest_core::KeyCodec;
///
/// struct Lowercase;
///
/// #[derive(Debug)]
/// struct NotLowercase;
///
/// impl std::fmt::Display for NotLowercase {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("key is not lowercase")
///     }
/// }
///
/// impl std::error::Error for NotLowercase {}
///
/// impl KeyCodec for Lowercase {
///     type Item = String;
///     type Error = NotLowercase;
///
///     fn key_of(&self, item: &String) -> String {
///         item.to_lowercase()
///     }
///
///     fn from_key(&self, key: &str) -> Result<String, NotLowercase> {
///         if key.chars().any(char::is_uppercase) {
///             return Err(NotLowercase);
///         }
///         Ok(key.to_owned())
///     }
/// }
///
/// let codec = Lowercase;
/// assert_eq!(codec.key_of(&"AbC".to_owned()), "abc");
/// assert!(codec.from_key("ABC").is_err());
/// ```
pub trait KeyCodec {
    /// Item type described by the keys.
    type Item;

    /// Failure raised when a key does not describe a valid item.
    type Error: StdError + Send + Sync + 'static;

    /// Derives the canonical key of `item`.
    fn key_of(&self, item: &Self::Item) -> String;

    /// Rebuilds an item from a previously derived key.
    ///
    /// # Errors
    /// Returns [`Self::Error`] when `key` is not a well-formed key.
    fn from_key(&self, key: &str) -> Result<Self::Item, Self::Error>;
}
