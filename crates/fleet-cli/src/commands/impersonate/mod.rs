mod end;
mod start;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ImpersonateCommands;
use crate::context::AppContext;

/// Handle `fleet impersonate <subcommand>`.
pub fn handle(
    action: &ImpersonateCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ImpersonateCommands::Start(args) => start::handle(args, ctx, flags),
        ImpersonateCommands::End => end::handle(ctx, flags),
        ImpersonateCommands::Status => status::handle(ctx, flags),
    }
}
