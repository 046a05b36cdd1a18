//! Header-bounded section splitting for content re-association.
//!
//! Unlike [`crate::structure`], this pass keeps every header, structural ones
//! included. Entries find their full body by exact header line number, so the
//! filtering rules of the structure parser never shift a section boundary.

use std::collections::HashMap;

use atlas_core::entities::LoreEntry;

use crate::document::{SourceDocument, parse_header};

/// The full text under one header, up to the next header of any level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// 1-indexed line of the header itself.
    pub line_start: usize,
    /// 1-indexed line of the last body line (or of the header, if empty).
    pub line_end: usize,
    /// Body lines joined with `\n`; the header line is not included.
    pub content: String,
}

/// Split a document into sections in line order. Text before the first
/// header belongs to no section.
#[must_use]
pub fn split_sections(content: &str) -> Vec<Section> {
    let document = SourceDocument::new(String::new(), content);
    let mut sections = Vec::new();
    let mut current: Option<(Section, Vec<&str>)> = None;

    for (line_number, line) in document.numbered_lines() {
        if let Some((_, name)) = parse_header(line) {
            if let Some((section, body)) = current.take() {
                sections.push(close(section, &body, line_number - 1));
            }
            let section = Section {
                name: name.to_string(),
                line_start: line_number,
                line_end: line_number,
                content: String::new(),
            };
            current = Some((section, Vec::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((section, body)) = current {
        let end = section.line_start + body.len();
        sections.push(close(section, &body, end));
    }
    sections
}

fn close(mut section: Section, body: &[&str], line_end: usize) -> Section {
    section.content = body.join("\n");
    section.line_end = line_end;
    section
}

/// Recover each entry's full body text, keyed by entry id.
///
/// Entries whose source document is absent, or whose header line does not
/// start any section, are left out of the map.
#[must_use]
pub fn associate_content(
    entries: &[LoreEntry],
    documents: &[SourceDocument],
) -> HashMap<String, String> {
    let by_file: HashMap<&str, HashMap<usize, Section>> = documents
        .iter()
        .map(|doc| {
            let sections = split_sections(&doc.content)
                .into_iter()
                .map(|section| (section.line_start, section))
                .collect();
            (doc.name.as_str(), sections)
        })
        .collect();

    let mut content = HashMap::with_capacity(entries.len());
    for entry in entries {
        let Some(sections) = by_file.get(entry.source_file.as_str()) else {
            continue;
        };
        match sections.get(&entry.line_number) {
            Some(section) => {
                content.insert(entry.id.clone(), section.content.clone());
            }
            None => tracing::warn!(
                id = %entry.id,
                name = %entry.name,
                file = %entry.source_file,
                line = entry.line_number,
                "no section starts at entry's header line"
            ),
        }
    }

    tracing::debug!(matched = content.len(), total = entries.len(), "associated content");
    content
}
