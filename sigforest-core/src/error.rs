//! Error types for the sigforest core library.
//!
//! Only two things can go wrong inside the core: a bulk key source cannot be
//! read, or a stored key cannot be turned back into an item. Everything else
//! (insertion, merging, root resolution, enumeration) is total.

use std::{error::Error as StdError, fmt, io, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Boxed error produced by a [`crate::KeyCodec`] while reconstructing an item.
pub type CodecFailure = Box<dyn StdError + Send + Sync + 'static>;

/// A bulk key source could not be read.
///
/// Raised before any key from the failing source is inserted, so a failed
/// load never leaves a partially populated set behind.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormatError {
    /// The underlying reader reported an I/O failure.
    #[error("failed to read key source `{source_name}`: {source}")]
    Io {
        /// Name of the source being loaded.
        source_name: Arc<str>,
        /// Error raised by the reader.
        #[source]
        source: io::Error,
    },
    /// The source contained bytes that are not valid UTF-8.
    #[error("key source `{source_name}` contains invalid UTF-8 on line {line}")]
    InvalidUtf8 {
        /// Name of the source being loaded.
        source_name: Arc<str>,
        /// One-based line number of the offending line.
        line: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`FormatError`] variants.
    enum FormatErrorCode for FormatError {
        /// The reader failed.
        Io => Io { .. } => "FORMAT_IO",
        /// The source was not UTF-8.
        InvalidUtf8 => InvalidUtf8 { .. } => "FORMAT_INVALID_UTF8",
    }
}

/// A stored key could not be reconstructed into an item.
///
/// Keys are never validated on insertion; this error surfaces the first time
/// the offending key is materialised and leaves the set itself intact.
#[derive(Debug, Error)]
#[error("key `{key}` could not be reconstructed: {source}")]
pub struct ReconstructionError {
    key: Arc<str>,
    #[source]
    source: CodecFailure,
}

impl ReconstructionError {
    /// Wraps a codec failure for `key`.
    ///
    /// # Examples
    /// ```
    /// use sigforest_core::ReconstructionError;
    ///
    /// let err = ReconstructionError::new("x?", "unexpected character");
    /// assert_eq!(err.key(), "x?");
    /// ```
    pub fn new(key: impl Into<Arc<str>>, source: impl Into<CodecFailure>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Returns the key that failed to reconstruct.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Umbrella error for callers that drive loading and enumeration together.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum KeySetError {
    /// A bulk load failed.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A representative or item could not be materialised.
    #[error(transparent)]
    Reconstruction(#[from] ReconstructionError),
}

define_error_codes! {
    /// Stable codes describing [`KeySetError`] variants.
    enum KeySetErrorCode for KeySetError {
        /// A bulk load failed.
        Format => Format(..) => "KEYSET_FORMAT",
        /// A stored key failed to reconstruct.
        Reconstruction => Reconstruction(..) => "KEYSET_RECONSTRUCTION",
    }
}

impl KeySetError {
    /// Retrieve the inner [`FormatErrorCode`] when the error came from a load.
    #[must_use]
    pub const fn format_code(&self) -> Option<FormatErrorCode> {
        match self {
            Self::Format(error) => Some(error.code()),
            Self::Reconstruction(_) => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, KeySetError>;
