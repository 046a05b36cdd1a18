//! Curation commands: `status`, `pin`, `skip`, `jump`, `back`.
//!
//! Each loads the work queue and pinned store, applies one operation, and
//! for mutations writes both stores back before printing the new cursor.

use anyhow::Context;
use atlas_core::entities::{PinnedData, WorkQueue};
use atlas_core::enums::LocationType;
use atlas_core::errors::CoreError;
use atlas_core::responses::CursorResponse;
use atlas_store::{PinRequest, curation};
use chrono::{DateTime, Utc};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{BackArgs, JumpArgs, PinArgs, SkipArgs};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `atlas status`.
pub fn handle_status(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let queue = ctx.store.require_work_queue()?;
    output(&curation::cursor(&queue), flags.format)
}

/// Handle `atlas pin`.
pub fn handle_pin(args: &PinArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = pin(args, ctx, Utc::now())?;
    output(&response, flags.format)
}

/// Handle `atlas skip`.
pub fn handle_skip(args: &SkipArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = mutate(ctx, |queue, _| curation::skip(queue, &args.id))?;
    output(&response, flags.format)
}

/// Handle `atlas jump`.
pub fn handle_jump(args: &JumpArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = mutate(ctx, |queue, _| curation::jump_to_file(queue, &args.file))?;
    output(&response, flags.format)
}

/// Handle `atlas back`.
pub fn handle_back(args: &BackArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = mutate(ctx, |queue, pinned| curation::back(queue, pinned, args.from))?;
    output(&response, flags.format)
}

/// Validate the requested type and pin the entry at `now`.
pub fn pin(
    args: &PinArgs,
    ctx: &AppContext,
    now: DateTime<Utc>,
) -> anyhow::Result<CursorResponse> {
    let location_type: LocationType = parse_enum(&args.location_type, "type")?;
    let request = PinRequest {
        coordinates: [args.x, args.y],
        zoom_level: args.zoom,
        location_type,
    };
    mutate(ctx, |queue, pinned| {
        curation::pin(queue, pinned, &args.id, request, now)
    })
}

/// Load both stores, apply `operation`, and save both stores on success.
fn mutate<F>(ctx: &AppContext, operation: F) -> anyhow::Result<CursorResponse>
where
    F: FnOnce(&mut WorkQueue, &mut PinnedData) -> Result<CursorResponse, CoreError>,
{
    let store = &ctx.store;
    let mut queue = store.require_work_queue()?;
    let mut pinned = store.load_pinned().context("failed to load pinned store")?;

    let response = operation(&mut queue, &mut pinned)?;

    store
        .save_pinned(&pinned)
        .context("failed to write pinned store")?;
    store
        .save_work_queue(&queue)
        .context("failed to write work queue")?;
    Ok(response)
}
