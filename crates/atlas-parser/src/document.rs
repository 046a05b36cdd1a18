//! Source documents and the line-level markdown primitives shared by the
//! structure parser and the section splitter.

use std::path::Path;

use crate::error::ParserError;

/// A named corpus document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name as recorded on entries (e.g. `"Ve.md"`).
    pub name: String,
    pub content: String,
}

impl SourceDocument {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read `dir/name` from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::Io`] if the file cannot be read.
    pub fn read(dir: &Path, name: &str) -> Result<Self, ParserError> {
        let content = std::fs::read_to_string(dir.join(name))?;
        Ok(Self::new(name, content))
    }

    /// Iterate lines with 1-indexed line numbers.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        lines(&self.content).enumerate().map(|(i, line)| (i + 1, line))
    }
}

/// Split on `\n`, dropping a trailing `\r` from each line.
///
/// A trailing newline yields a final empty line, matching a plain split.
pub fn lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Recognise an ATX header line: 1–6 `#`, one whitespace character, then at
/// least one more character. Returns the level and the trimmed header text,
/// which is empty for a line like `"##  "`.
#[must_use]
pub fn parse_header(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }
    let mut chars = line[hashes..].chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        return None;
    }
    let level = u8::try_from(hashes).ok()?;
    Some((level, rest.trim()))
}

/// Parse a `Tags: a, b, c` line into lowercase, trimmed, non-empty tags.
#[must_use]
pub fn parse_tags_line(line: &str) -> Option<Vec<String>> {
    let rest = line.strip_prefix("Tags:")?;
    Some(
        rest.split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect(),
    )
}
