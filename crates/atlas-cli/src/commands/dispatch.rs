use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Extract => commands::extract::handle(ctx, flags),
        Commands::Finalize => commands::finalize::handle(ctx, flags),
        Commands::Status => commands::curate::handle_status(ctx, flags),
        Commands::Pin(args) => commands::curate::handle_pin(args, ctx, flags),
        Commands::Skip(args) => commands::curate::handle_skip(args, ctx, flags),
        Commands::Jump(args) => commands::curate::handle_jump(args, ctx, flags),
        Commands::Back(args) => commands::curate::handle_back(args, ctx, flags),
        Commands::Schema(args) => commands::schema::handle(args, flags),
    }
}
