//! Markdown structure parsing: turns documents into an ordered forest of
//! header-delimited [`LoreEntry`] values with parent links.
//!
//! A [`ParseSession`] owns the id counter for one extraction run, so ids are
//! assigned in file-then-line order across every document parsed through the
//! same session. Within a document, parent tracking uses a fixed table of
//! "last id seen at depth N" slots:
//!
//! ```text
//! ## Ve              slot[2] = 1
//! ### Kyagos         parent 1, slot[3] = 2
//! ### Geography      skipped: no entry, no slot
//! #### Vel Harbour   parent 2 (nearest shallower slot)
//! ## Clueanda        slot[2] = 4, slots 3..6 cleared
//! ```

use std::collections::HashSet;

use atlas_core::entities::LoreEntry;
use atlas_core::enums::EntryStatus;

use crate::classify::{suggest_type, suggest_zoom};
use crate::document::{SourceDocument, parse_header, parse_tags_line};
use crate::error::ParserError;

/// Maximum number of body lines folded into a preview.
const PREVIEW_LINES: usize = 5;

/// Maximum preview length in characters.
const PREVIEW_CHARS: usize = 500;

/// Deepest markdown header level.
const MAX_DEPTH: usize = 6;

/// One extraction run's parser state.
#[derive(Debug, Clone)]
pub struct ParseSession {
    next_id: u64,
    skip_headers: HashSet<String>,
}

impl ParseSession {
    /// Start a session whose first entry gets id `"1"`.
    ///
    /// `skip_headers` are matched case-insensitively against trimmed header text.
    pub fn new<I, S>(skip_headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            next_id: 1,
            skip_headers: skip_headers
                .into_iter()
                .map(|h| h.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// The id the next emitted entry will receive.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Whether a header names a structural section rather than a place.
    #[must_use]
    pub fn is_skipped_header(&self, name: &str) -> bool {
        self.skip_headers.contains(&name.trim().to_lowercase())
    }

    /// Parse every document in order, continuing the id sequence across them.
    ///
    /// # Errors
    ///
    /// Propagates [`ParserError`] from [`Self::parse_document`].
    pub fn parse_all<'a, I>(&mut self, documents: I) -> Result<Vec<LoreEntry>, ParserError>
    where
        I: IntoIterator<Item = &'a SourceDocument>,
    {
        let mut entries = Vec::new();
        for document in documents {
            entries.extend(self.parse_document(document)?);
        }
        Ok(entries)
    }

    /// Parse one document into entries, in line order.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::InvalidHeaderLevel`] if the zoom classifier is
    /// handed a level outside 1–6, which the header scanner never produces.
    pub fn parse_document(
        &mut self,
        document: &SourceDocument,
    ) -> Result<Vec<LoreEntry>, ParserError> {
        let mut pass = DocumentPass {
            session: self,
            source_file: &document.name,
            slots: Default::default(),
            region: None,
            entries: Vec::new(),
        };

        for (line_number, line) in document.numbered_lines() {
            if let Some((level, name)) = parse_header(line) {
                pass.flush()?;
                pass.region = Some(Region::new(level, name, line_number));
                continue;
            }

            let Some(region) = pass.region.as_mut() else {
                continue;
            };

            if !region.seen_body {
                if let Some(tags) = parse_tags_line(line) {
                    region.tags = tags;
                    continue;
                }
            }

            if !line.trim().is_empty() {
                region.seen_body = true;
            }
            region.body.push(line.to_string());
        }
        pass.flush()?;

        tracing::debug!(
            file = %document.name,
            entries = pass.entries.len(),
            "parsed document"
        );
        Ok(pass.entries)
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}

/// The header currently collecting body lines.
struct Region {
    level: u8,
    name: String,
    line_number: usize,
    tags: Vec<String>,
    body: Vec<String>,
    seen_body: bool,
}

impl Region {
    fn new(level: u8, name: &str, line_number: usize) -> Self {
        Self {
            level,
            name: name.to_string(),
            line_number,
            tags: Vec::new(),
            body: Vec::new(),
            seen_body: false,
        }
    }

    fn preview(&self) -> String {
        let joined = self
            .body
            .iter()
            .filter(|line| {
                !line.trim().is_empty() && !line.starts_with('#') && !line.starts_with("Tags:")
            })
            .take(PREVIEW_LINES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        joined.chars().take(PREVIEW_CHARS).collect()
    }
}

/// State for one document: the depth slots are local to the file.
struct DocumentPass<'s> {
    session: &'s mut ParseSession,
    source_file: &'s str,
    slots: [Option<String>; MAX_DEPTH],
    region: Option<Region>,
    entries: Vec<LoreEntry>,
}

impl DocumentPass<'_> {
    fn flush(&mut self) -> Result<(), ParserError> {
        let Some(region) = self.region.take() else {
            return Ok(());
        };

        // Structural headers produce nothing and leave the slots untouched,
        // so their children attach to the last real heading above them.
        if self.session.is_skipped_header(&region.name) {
            return Ok(());
        }

        let level = usize::from(region.level);
        let parent_entry_id = (1..level)
            .rev()
            .find_map(|depth| self.slots[depth - 1].clone());

        let id = self.session.allocate_id();
        self.slots[level - 1] = Some(id.clone());
        for slot in &mut self.slots[level..] {
            *slot = None;
        }

        let content_preview = region.preview();
        let suggested_type = suggest_type(&region.tags, &content_preview, region.level);
        let suggested_zoom_level = suggest_zoom(region.level)?;

        self.entries.push(LoreEntry {
            id,
            header_text: format!("{} {}", "#".repeat(level), region.name),
            name: region.name,
            header_level: region.level,
            line_number: region.line_number,
            source_file: self.source_file.to_string(),
            tags: region.tags,
            suggested_type,
            suggested_zoom_level,
            content_preview,
            parent_entry_id,
            status: EntryStatus::Pending,
        });
        Ok(())
    }
}
