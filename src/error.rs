use std::io;

use thiserror::Error;

/// A structural violation found while parsing INI text.
///
/// Every variant carries the 1-based line number where parsing stopped.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: section name cannot be empty")]
    SectionNameEmpty { line: usize },
    #[error("line {line}: unmatched bracket in section header")]
    UnmatchedBracket { line: usize },
    #[error("line {line}: expected `key=value`")]
    MissingSeparator { line: usize },
    #[error("line {line}: key-value pair found before any section")]
    NoGlobalKey { line: usize },
}

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text violates the line-level grammar.
    Syntax,
    /// A key-value line appeared before the first section header.
    NoGlobalKey,
}

impl ParseError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::SectionNameEmpty { .. }
            | Self::UnmatchedBracket { .. }
            | Self::MissingSeparator { .. } => ErrorKind::Syntax,
            Self::NoGlobalKey { .. } => ErrorKind::NoGlobalKey,
        }
    }

    #[must_use]
    pub fn line(&self) -> usize {
        match *self {
            Self::SectionNameEmpty { line }
            | Self::UnmatchedBracket { line }
            | Self::MissingSeparator { line }
            | Self::NoGlobalKey { line } => line,
        }
    }
}

/// Returned by [`Ini::try_get`](crate::Ini::try_get) when the lookup misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("there is no section with this name")]
    SectionNotFound,
    #[error("there is no key with this name")]
    KeyNotFound,
}

/// Errors from loading or saving INI data through a reader, writer or file.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to parse INI data: {0}")]
    Parse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            ParseError::SectionNameEmpty { line: 1 }.kind(),
            ErrorKind::Syntax
        );
        assert_eq!(
            ParseError::UnmatchedBracket { line: 1 }.kind(),
            ErrorKind::Syntax
        );
        assert_eq!(
            ParseError::MissingSeparator { line: 1 }.kind(),
            ErrorKind::Syntax
        );
        assert_eq!(
            ParseError::NoGlobalKey { line: 1 }.kind(),
            ErrorKind::NoGlobalKey
        );
    }

    #[test]
    fn display_includes_line() {
        let err = ParseError::MissingSeparator { line: 7 };
        assert_eq!(err.to_string(), "line 7: expected `key=value`");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn io_error_is_transparent() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "missing.ini"));
        assert_eq!(err.to_string(), "missing.ini");
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }
}
