#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! A parser and canonical serializer for flat INI text.
//!
//! ```
//! let mut ini = ini::Ini::parse("[server]\nport = 8080\n").unwrap();
//! ini.set("server", "host", "localhost");
//! assert_eq!(ini.to_string(), "[server]\nhost=localhost\nport=8080\n");
//! ```

mod error;
mod parser;
mod section;
mod serializer;

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;
use std::{char, fmt, fs};

pub use crate::error::{Error, ErrorKind, LookupError, ParseError, Result};
pub use crate::parser::Parser;
pub use crate::section::{Iter, Section};
pub use crate::serializer::{serialize, write_canonical};

/// Byte Order Mark (BOM) is used to signal the endianness of an encoding. The order `0xFF 0xFE`
/// strongly suggests that the encoding is using little-endian byte order.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// An INI document: section name to [`Section`].
///
/// Section names are unique and case-sensitive. Iteration order is unspecified; use
/// [`serialize`] (or `to_string`) for a deterministic rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Ini {
    sections: HashMap<String, Section>,
}

impl Ini {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text into a new document.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on the first malformed line. No partially built document is
    /// ever returned.
    pub fn parse(text: &str) -> std::result::Result<Self, ParseError> {
        let sections = Parser::new(text).into_sections()?;
        Ok(Self { sections })
    }

    /// Replace the contents of `self` with the parsed `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on the first malformed line, in which case `self` is left
    /// empty.
    pub fn load_str(&mut self, text: &str) -> std::result::Result<(), ParseError> {
        match Self::parse(text) {
            Ok(parsed) => {
                *self = parsed;
                Ok(())
            }
            Err(err) => {
                self.sections.clear();
                Err(err)
            }
        }
    }

    /// Read everything from `reader` and parse it.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Io`] if reading fails, or [`Error::Parse`] if the data is not
    /// valid INI.
    pub fn from_reader<R>(reader: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let mut buffer = Vec::with_capacity(4096);
        reader.read_to_end(&mut buffer)?;
        let text = decode_data(&buffer);
        Ok(Self::parse(&text)?)
    }

    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Io`] if the file is missing or unreadable, or [`Error::Parse`] if
    /// its contents are not valid INI.
    pub fn load_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let data = fs::read(path)?;
        log::debug!("read {} bytes from {}", data.len(), path.display());

        let ini = Self::parse(&decode_data(&data))?;
        log::debug!("loaded {} sections from {}", ini.len(), path.display());
        Ok(ini)
    }

    /// Write the canonical form of `self` to the file at `path`, replacing it.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Io`] if the file cannot be written.
    pub fn save_file<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = serialize(self);
        fs::write(path, &text)?;
        log::debug!("wrote {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    /// Write the canonical form of `self` to `writer`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Io`] if writing fails.
    pub fn write_to<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        writer.write_all(serialize(self).as_bytes())?;
        Ok(())
    }

    /// Names of every section, in no particular order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// The full mapping, borrowed. Mutation goes through [`Ini::set`] or
    /// [`Ini::section_mut`].
    #[must_use]
    pub fn sections(&self) -> &HashMap<String, Section> {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Look up `key` in `section`. An empty value is `Some("")`, never `None`.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key)
    }

    /// Like [`Ini::get`], but reports which half of the lookup missed.
    ///
    /// # Errors
    ///
    /// [`LookupError::SectionNotFound`] if `section` does not exist, otherwise
    /// [`LookupError::KeyNotFound`] if `key` does not exist within it.
    pub fn try_get(&self, section: &str, key: &str) -> std::result::Result<&str, LookupError> {
        self.sections
            .get(section)
            .ok_or(LookupError::SectionNotFound)?
            .get(key)
            .ok_or(LookupError::KeyNotFound)
    }

    /// Insert or overwrite `key` in `section`, creating the section if needed.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .set(key, value);
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.remove(name)
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<K> FromIterator<(K, Section)> for Ini
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Section)>>(iter: I) -> Self {
        Self {
            sections: iter
                .into_iter()
                .map(|(name, section)| (name.into(), section))
                .collect(),
        }
    }
}

impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_canonical(self, f)
    }
}

// Text is read as UTF-8 unless a UTF-16 LE BOM says otherwise.
fn decode_data(data: &[u8]) -> String {
    if let Some(rest) = data.strip_prefix(BOM_UTF16_LE) {
        let utf16 = rest
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>()
    } else {
        let data = data.strip_prefix(BOM_UTF8).unwrap_or(data);
        String::from_utf8_lossy(data).into_owned()
    }
}
