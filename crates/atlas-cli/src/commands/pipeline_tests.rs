//! Extract, curate, and finalize against a project in a temp directory.

use std::path::Path;

use atlas_config::{AtlasConfig, CorpusConfig};
use atlas_core::entities::{AmbiguousReference, Location};
use atlas_core::enums::EntryStatus;
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::cli::root_commands::PinArgs;
use crate::commands::{curate, extract, finalize};
use crate::context::AppContext;

const VE: &str = "# Ve
A cold continent.
## Geography
### Kyagos
Tags: city, port
Ships from Ravenhold dock here daily.
#### Tidewatch
A fortress watching Kyagos.
## Ravenhold
Tags: ruins
";

const CLUEANDA: &str = "# Clueanda
A southern land.
## Ravenhold
A market town.
## Sunmarch
Pilgrims fear Ravenhold.
";

const ABOYINZU: &str = "# Aboyinzu
Traders name Ravenhold in every port.
";

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
}

fn project() -> (TempDir, AppContext) {
    let temp = TempDir::new().expect("tempdir should create");
    let lore = temp.path().join("lore");
    std::fs::create_dir(&lore).expect("lore dir should create");
    for (name, text) in [("Ve.md", VE), ("Clueanda.md", CLUEANDA), ("Aboyinzu.md", ABOYINZU)] {
        std::fs::write(lore.join(name), text).expect("lore file should write");
    }

    let config = AtlasConfig {
        corpus: CorpusConfig {
            source_files: ["Ve.md", "Clueanda.md", "Aboyinzu.md", "Missing.md"]
                .map(String::from)
                .to_vec(),
            ..CorpusConfig::default()
        },
        ..AtlasConfig::default()
    };
    let ctx = AppContext::with_config(temp.path().to_path_buf(), config);
    (temp, ctx)
}

fn pin_args(id: &str, zoom: u8, location_type: &str) -> PinArgs {
    PinArgs {
        id: id.to_string(),
        x: 100.0,
        y: -40.5,
        zoom,
        location_type: location_type.to_string(),
    }
}

fn read<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let text = std::fs::read_to_string(path).expect("document should exist");
    serde_json::from_str(&text).expect("document should parse")
}

#[test]
fn extract_builds_a_pending_queue_and_empty_pins() {
    let (_temp, ctx) = project();
    let summary = extract::run(&ctx, at(1)).expect("extract succeeds");

    assert_eq!(summary.stats.total, 8);
    assert_eq!(summary.stats.pending, 8);
    assert_eq!(summary.current_index, 0);
    assert_eq!(summary.missing_files, vec!["Missing.md"]);
    assert!(summary.orphaned_pins.is_empty());
    assert_eq!(summary.by_type.iter().map(|(_, n)| n).sum::<usize>(), 8);

    let queue = ctx.store.require_work_queue().expect("queue written");
    let names: Vec<&str> = queue.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Ve", "Kyagos", "Tidewatch", "Ravenhold", "Clueanda", "Ravenhold", "Sunmarch", "Aboyinzu"]
    );
    assert_eq!(queue.extracted_at, at(1));
    assert!(ctx.store.require_pinned().expect("pins written").is_empty());
}

#[test]
fn finalize_before_extract_is_fatal() {
    let (_temp, ctx) = project();
    let error = finalize::run(&ctx).expect_err("no work queue yet");
    assert!(format!("{error:#}").contains("atlas extract"));
}

#[test]
fn curated_pins_finalize_into_linked_locations() {
    let (_temp, ctx) = project();
    extract::run(&ctx, at(1)).expect("extract succeeds");

    for (id, zoom, kind) in [
        ("1", 1, "region"),
        ("2", 3, "city"),
        ("3", 4, "fortress"),
        ("4", 3, "ruins"),
        ("5", 1, "region"),
        ("6", 3, "town"),
        ("7", 3, "town"),
        ("8", 1, "region"),
    ] {
        curate::pin(&pin_args(id, zoom, kind), &ctx, at(2)).expect("pin succeeds");
    }
    let queue = ctx.store.require_work_queue().expect("queue");
    assert_eq!(queue.stats().pinned, 8);

    let summary = finalize::run(&ctx).expect("finalize succeeds");
    assert_eq!(summary.locations, 8);
    assert_eq!(summary.auto_resolved, 3);
    assert_eq!(summary.ambiguous, 1);
    assert_eq!(summary.with_parent, 5);
    assert_eq!(summary.duplicate_names, 1);

    let locations: Vec<Location> = read(&ctx.store.locations_path());
    let related = |id: &str| {
        locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.related_ids.clone())
            .expect("location present")
    };
    assert_eq!(related("2"), vec!["4"]);
    assert_eq!(related("3"), vec!["2"]);
    assert_eq!(related("7"), vec!["6"]);
    assert_eq!(locations[0].zoom_level, 1);
    assert_eq!(locations[0].name, "Aboyinzu");

    let ambiguous: Vec<AmbiguousReference> = read(&ctx.store.ambiguous_path());
    assert_eq!(ambiguous.len(), 1);
    assert_eq!(ambiguous[0].source_id, "8");
    assert_eq!(ambiguous[0].candidate_ids, vec!["4", "6"]);
    assert_eq!(
        ambiguous[0].candidate_names,
        vec!["Ravenhold (Ve.md:9)", "Ravenhold (Clueanda.md:3)"]
    );
}

#[test]
fn decisions_survive_re_extraction_and_back_undoes_them() {
    let (_temp, ctx) = project();
    extract::run(&ctx, at(1)).expect("extract succeeds");

    curate::pin(&pin_args("1", 1, "region"), &ctx, at(2)).expect("pin succeeds");
    let mut queue = ctx.store.require_work_queue().expect("queue");
    atlas_store::curation::skip(&mut queue, "2").expect("skip succeeds");
    ctx.store.save_work_queue(&queue).expect("queue saves");

    let summary = extract::run(&ctx, at(3)).expect("re-extract succeeds");
    assert_eq!(summary.stats.pinned, 1);
    assert_eq!(summary.stats.skipped, 1);
    assert_eq!(summary.current_index, 2);

    let mut queue = ctx.store.require_work_queue().expect("queue");
    let mut pinned = ctx.store.load_pinned().expect("pins");
    let cursor = atlas_store::curation::back(&mut queue, &mut pinned, None).expect("back succeeds");
    assert_eq!(cursor.current_index, Some(1));
    assert_eq!(queue.entries[1].status, EntryStatus::Pending);
    assert!(pinned.contains_key("1"));
}

#[test]
fn pin_rejects_bad_requests_without_writing() {
    let (_temp, ctx) = project();
    extract::run(&ctx, at(1)).expect("extract succeeds");

    assert!(curate::pin(&pin_args("1", 9, "region"), &ctx, at(2)).is_err());
    assert!(curate::pin(&pin_args("1", 2, "castle"), &ctx, at(2)).is_err());
    assert!(curate::pin(&pin_args("404", 2, "city"), &ctx, at(2)).is_err());

    assert!(ctx.store.require_pinned().expect("pins").is_empty());
    assert_eq!(ctx.store.require_work_queue().expect("queue").stats().pending, 8);
}

#[test]
fn a_stored_jump_survives_until_the_next_decision() {
    let (_temp, ctx) = project();
    extract::run(&ctx, at(1)).expect("extract succeeds");

    let mut queue = ctx.store.require_work_queue().expect("queue");
    atlas_store::curation::jump_to_file(&mut queue, "Clueanda.md").expect("jump succeeds");
    ctx.store.save_work_queue(&queue).expect("queue saves");

    let stored = ctx.store.require_work_queue().expect("queue");
    let status = atlas_store::curation::cursor(&stored);
    assert_eq!(status.current_index, Some(4));
    assert_eq!(status.current_entry.expect("entry").name, "Clueanda");

    curate::pin(&pin_args("5", 1, "region"), &ctx, at(2)).expect("pin succeeds");
    let stored = ctx.store.require_work_queue().expect("queue");
    assert_eq!(atlas_store::curation::cursor(&stored).current_index, Some(0));
}
