//! Bulk loading of whitespace-delimited key files.

use std::{io::BufRead, sync::Arc};

use tracing::{debug, instrument};

use crate::error::FormatError;

use super::KeyedDisjointSet;

impl<C> KeyedDisjointSet<C> {
    /// Builds a set from the keys in `reader`, naming it `name`.
    ///
    /// Each key becomes an isolated component, in input order. See
    /// [`Self::load`] for the accepted format and error behaviour.
    ///
    /// # Errors
    /// Returns [`FormatError`] when `reader` fails or yields invalid UTF-8.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use sigforest_core::{KeyCodec, KeyedDisjointSet};
    /// # struct Plain;
    /// # impl KeyCodec for Plain {
    /// #     type Item = String;
    /// #     type Error = std::convert::Infallible;
    /// #     fn key_of(&self, item: &String) -> String { item.clone() }
    /// #     fn from_key(&self, key: &str) -> Result<String, Self::Error> { Ok(key.to_owned()) }
    /// # }
    ///
    /// let set = KeyedDisjointSet::from_reader(Plain, "census", Cursor::new("b a\nc\n"))?;
    /// assert_eq!(set.name(), "census");
    /// assert_eq!(set.component_count(), 3);
    /// assert_eq!(set.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    /// # Ok::<(), sigforest_core::FormatError>(())
    /// ```
    pub fn from_reader<R: BufRead>(
        codec: C,
        name: impl Into<Arc<str>>,
        reader: R,
    ) -> Result<Self, FormatError> {
        let mut set = Self::with_name(codec, name);
        set.load(reader)?;
        Ok(set)
    }

    /// Appends the keys read from `reader` as new singleton components.
    ///
    /// Keys are separated by any whitespace, including newlines; blank lines
    /// are ignored and end of input ends the load. Keys already present
    /// resolve to their existing element. Keys are not validated here: a
    /// malformed key is only rejected when it is reconstructed.
    ///
    /// The whole source is read before anything is inserted, so on error the
    /// set is left exactly as it was. Returns how many keys were new.
    ///
    /// # Errors
    /// Returns [`FormatError::Io`] when `reader` fails and
    /// [`FormatError::InvalidUtf8`] when a line is not UTF-8.
    #[instrument(
        name = "keyset.load",
        err,
        skip(self, reader),
        fields(source = %self.name, existing = self.len()),
    )]
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<usize, FormatError> {
        let tokens = read_tokens(&self.name, reader)?;
        let read = tokens.len();
        let inserted = self.extend_keys(tokens);
        debug!(
            read,
            inserted,
            components = self.component_count(),
            "key source loaded"
        );
        Ok(inserted)
    }
}

fn read_tokens<R: BufRead>(
    source_name: &Arc<str>,
    mut reader: R,
) -> Result<Vec<String>, FormatError> {
    let mut tokens = Vec::new();
    let mut buffer = Vec::new();
    let mut line = 0usize;

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|source| FormatError::Io {
                source_name: Arc::clone(source_name),
                source,
            })?;
        if read == 0 {
            break;
        }
        line += 1;

        let text = std::str::from_utf8(&buffer).map_err(|_| FormatError::InvalidUtf8 {
            source_name: Arc::clone(source_name),
            line,
        })?;
        tokens.extend(text.split_whitespace().map(ToOwned::to_owned));
    }

    Ok(tokens)
}
