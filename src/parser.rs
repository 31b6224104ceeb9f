use std::collections::HashMap;
use std::iter::Enumerate;
use std::str::Split;

use crate::error::ParseError;
use crate::section::Section;

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Enumerate<Split<'a, char>>,
    sections: HashMap<String, Section>,
    current: Option<String>,
}

/// What a single trimmed line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Skip,
    Header(&'a str),
    Entry(&'a str, &'a str),
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').enumerate(),
            sections: HashMap::with_capacity(16),
            current: None,
        }
    }
}

impl Parser<'_> {
    // Moves `self` so the partially built map can only escape on success.
    pub fn into_sections(mut self) -> Result<HashMap<String, Section>, ParseError> {
        while let Some((i, raw)) = self.lines.next() {
            let line = i + 1;

            match classify(raw.trim(), line)? {
                Line::Skip => {}
                Line::Header(name) => {
                    // A repeated header starts the section over instead of merging.
                    self.sections.insert(name.to_owned(), Section::new());
                    self.current = Some(name.to_owned());
                }
                Line::Entry(key, value) => {
                    let section = self
                        .current
                        .as_deref()
                        .and_then(|name| self.sections.get_mut(name))
                        .ok_or(ParseError::NoGlobalKey { line })?;
                    section.set(key, value);
                }
            }
        }

        Ok(self.sections)
    }
}

fn classify(line: &str, number: usize) -> Result<Line<'_>, ParseError> {
    if line.is_empty() || line.starts_with([';', '#']) {
        return Ok(Line::Skip);
    }

    match (line.strip_prefix('['), line.ends_with(']')) {
        (Some(rest), true) => {
            let name = rest[..rest.len() - 1].trim();
            if name.is_empty() {
                return Err(ParseError::SectionNameEmpty { line: number });
            }
            Ok(Line::Header(name))
        }
        (Some(_), false) | (None, true) => Err(ParseError::UnmatchedBracket { line: number }),
        (None, false) => {
            let (key, value) = line
                .split_once('=')
                .ok_or(ParseError::MissingSeparator { line: number })?;
            Ok(Line::Entry(key.trim(), value.trim()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_lines() {
        assert_eq!(classify("", 1), Ok(Line::Skip));
        assert_eq!(classify("; comment", 1), Ok(Line::Skip));
        assert_eq!(classify("# comment", 1), Ok(Line::Skip));
        assert_eq!(classify("[ name ]", 1), Ok(Line::Header("name")));
        assert_eq!(classify("k = a=b", 1), Ok(Line::Entry("k", "a=b")));
        assert_eq!(classify("=v", 1), Ok(Line::Entry("", "v")));
    }

    #[test]
    fn lone_bracket_is_unmatched() {
        // "[" both starts with '[' and, being one character, cannot also close it.
        assert_eq!(
            classify("[", 4),
            Err(ParseError::UnmatchedBracket { line: 4 })
        );
        assert_eq!(
            classify("name]", 2),
            Err(ParseError::UnmatchedBracket { line: 2 })
        );
    }

    #[test]
    fn empty_brackets() {
        assert_eq!(
            classify("[  ]", 3),
            Err(ParseError::SectionNameEmpty { line: 3 })
        );
        assert_eq!(
            classify("[]", 3),
            Err(ParseError::SectionNameEmpty { line: 3 })
        );
    }

    #[test]
    fn key_before_section() {
        let result = Parser::new("\n; header comes later\nkey=value\n[s]").into_sections();

        assert_eq!(result, Err(ParseError::NoGlobalKey { line: 3 }));
    }

    #[test]
    fn missing_separator() {
        let result = Parser::new("[s]\nkey value").into_sections();

        assert_eq!(result, Err(ParseError::MissingSeparator { line: 2 }));
    }

    #[test]
    fn crlf_line_endings() {
        let sections = Parser::new("[s]\r\nk=v\r\n")
            .into_sections()
            .expect("failed to parse hardcoded INI text");

        assert_eq!(sections["s"].get("k"), Some("v"));
    }
}
