//! End-to-end parsing over a small multi-file corpus.

use atlas_core::enums::LocationType;
use atlas_parser::{ParseSession, SourceDocument, associate_content};
use pretty_assertions::assert_eq;

const SKIP: &[&str] = &["geography", "notable locations", "history", "todo"];

fn corpus() -> Vec<SourceDocument> {
    vec![
        SourceDocument::new(
            "Ve.md",
            "# Ve\n\
             Tags: continent\n\
             A cold northern continent.\n\
             \n\
             ## Geography\n\
             Glaciers cover the interior.\n\
             ### Kyagos\n\
             Tags: city, port\n\
             The Council of Tides governs from here.\n\
             #### Tidewatch\n\
             A stronghold guarding the harbour.\n\
             ## History\n\
             Long wars.\n\
             ## Ravenhold\n\
             Tags: ruins\n",
        ),
        SourceDocument::new(
            "Upoceax.md",
            "# Upoceax\r\n\
             An island realm.\r\n\
             ## Ravenhold\r\n\
             A village on the cliffs.\r\n\
             ### Todo\r\n\
             - fill in\r\n",
        ),
    ]
}

fn parse() -> Vec<atlas_core::entities::LoreEntry> {
    ParseSession::new(SKIP)
        .parse_all(&corpus())
        .expect("corpus parses")
}

#[test]
fn extracts_entries_in_file_then_line_order() {
    let entries = parse();
    let rows: Vec<_> = entries
        .iter()
        .map(|e| {
            (
                e.id.as_str(),
                e.name.as_str(),
                e.source_file.as_str(),
                e.line_number,
                e.parent_entry_id.as_deref(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("1", "Ve", "Ve.md", 1, None),
            ("2", "Kyagos", "Ve.md", 7, Some("1")),
            ("3", "Tidewatch", "Ve.md", 10, Some("2")),
            ("4", "Ravenhold", "Ve.md", 14, Some("1")),
            ("5", "Upoceax", "Upoceax.md", 1, None),
            ("6", "Ravenhold", "Upoceax.md", 3, Some("5")),
        ]
    );
}

#[test]
fn classification_uses_tags_then_content_then_level() {
    let entries = parse();
    let types: Vec<_> = entries.iter().map(|e| e.suggested_type).collect();
    assert_eq!(
        types,
        vec![
            LocationType::Region,   // continent tag
            LocationType::City,     // city tag
            LocationType::Fortress, // "stronghold" in preview
            LocationType::Ruins,    // ruins tag
            LocationType::Region,   // level 1 fallback
            LocationType::Town,     // "village" in preview
        ]
    );
}

#[test]
fn reparsing_an_unchanged_corpus_assigns_identical_ids() {
    let keys = |entries: &[atlas_core::entities::LoreEntry]| {
        entries
            .iter()
            .map(|e| {
                (
                    e.id.clone(),
                    e.source_file.clone(),
                    e.line_number,
                    e.parent_entry_id.clone(),
                )
            })
            .collect::<Vec<_>>()
    };
    let first = parse();
    let second = parse();
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(first, second);
}

#[test]
fn parents_are_shallower_and_earlier_in_the_same_file() {
    let entries = parse();
    for entry in &entries {
        let Some(parent_id) = &entry.parent_entry_id else {
            continue;
        };
        let parent = entries
            .iter()
            .find(|e| &e.id == parent_id)
            .expect("parent exists");
        assert!(parent.header_level < entry.header_level);
        assert!(parent.line_number < entry.line_number);
        assert_eq!(parent.source_file, entry.source_file);
    }
}

#[test]
fn full_content_is_recovered_for_every_entry() {
    let docs = corpus();
    let entries = parse();
    let content = associate_content(&entries, &docs);

    assert_eq!(content.len(), entries.len());
    assert_eq!(
        content["2"],
        "Tags: city, port\nThe Council of Tides governs from here."
    );
    assert_eq!(content["6"], "A village on the cliffs.");
}
