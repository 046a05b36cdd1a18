use std::collections::BTreeMap;

use anyhow::Context;
use atlas_core::entities::LoreEntry;
use atlas_core::responses::ExtractSummary;
use atlas_parser::ParseSession;
use atlas_store::rebuild_work_queue;
use chrono::{DateTime, Utc};

use crate::cli::GlobalFlags;
use crate::commands::shared::corpus::read_corpus;
use crate::context::AppContext;
use crate::output::output;

/// Handle `atlas extract`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = run(ctx, Utc::now())?;
    output(&summary, flags.format)
}

/// Parse the corpus and rebuild the work queue, carrying prior decisions.
pub fn run(ctx: &AppContext, now: DateTime<Utc>) -> anyhow::Result<ExtractSummary> {
    let corpus_config = &ctx.config.corpus;
    let corpus = read_corpus(&ctx.lore_dir, &corpus_config.source_files)?;

    let mut session = ParseSession::new(&corpus_config.skip_headers);
    let entries = session
        .parse_all(&corpus.documents)
        .context("failed to parse lore corpus")?;
    tracing::info!(
        entries = entries.len(),
        documents = corpus.documents.len(),
        "parsed lore corpus"
    );

    let store = &ctx.store;
    store
        .ensure_pinned_initialized()
        .context("failed to initialise pinned store")?;
    let previous = store
        .load_work_queue()
        .context("failed to load previous work queue")?;
    let pinned = store.load_pinned().context("failed to load pinned store")?;

    let by_type = type_distribution(&entries);
    let outcome = rebuild_work_queue(
        entries,
        corpus_config.source_files.clone(),
        &pinned,
        previous.as_ref(),
        now,
    );
    store
        .save_work_queue(&outcome.queue)
        .context("failed to write work queue")?;

    Ok(ExtractSummary {
        stats: outcome.queue.stats(),
        current_index: outcome.queue.current_index,
        by_type,
        missing_files: corpus.missing,
        orphaned_pins: outcome.orphaned_pins,
    })
}

/// Suggested type counts, most frequent first, ties by type name.
fn type_distribution(entries: &[LoreEntry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.suggested_type.as_str()).or_default() += 1;
    }
    let mut by_type: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(kind, count)| (kind.to_string(), count))
        .collect();
    by_type.sort_by(|a, b| b.1.cmp(&a.1));
    by_type
}
