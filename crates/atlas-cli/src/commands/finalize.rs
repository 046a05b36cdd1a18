use std::collections::BTreeSet;

use anyhow::Context;
use atlas_core::responses::FinalizeSummary;
use atlas_link::{ResolverPolicy, finalize};
use atlas_parser::associate_content;

use crate::cli::GlobalFlags;
use crate::commands::shared::corpus::read_corpus;
use crate::context::AppContext;
use crate::output::output;

/// Handle `atlas finalize`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let summary = run(ctx)?;
    output(&summary, flags.format)
}

/// Build `locations.json` and `ambiguous-references.json` from the pinned
/// entries of the current work queue.
pub fn run(ctx: &AppContext) -> anyhow::Result<FinalizeSummary> {
    let store = &ctx.store;
    let queue = store.require_work_queue()?;
    let pinned = store.require_pinned()?;
    tracing::info!(
        entries = queue.entries.len(),
        pins = pinned.len(),
        "loaded work queue and pins"
    );

    // Content comes from the files the entries actually point at.
    let files: Vec<&str> = queue
        .entries
        .iter()
        .map(|entry| entry.source_file.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let corpus = read_corpus(&ctx.lore_dir, &files)?;
    let content = associate_content(&queue.entries, &corpus.documents);

    let policy = ResolverPolicy::from(&ctx.config.resolver);
    let result = finalize(&queue, &pinned, &content, &policy)
        .context("failed to resolve cross-references")?;

    store
        .save_locations(&result.locations)
        .context("failed to write locations")?;
    if store
        .save_ambiguous(&result.ambiguous)
        .context("failed to write ambiguous references")?
    {
        tracing::warn!(
            count = result.ambiguous.len(),
            path = %store.ambiguous_path().display(),
            "ambiguous references need manual review"
        );
    }

    Ok(result.summary)
}
