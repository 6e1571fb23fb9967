use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LogoutResponse {
    cleared: bool,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Clearing the slot mid-impersonation would strand the saved original tokens.
    if ctx.manager.is_impersonating() {
        anyhow::bail!("logout: an impersonation is active; run `fleet impersonate end` first");
    }

    ctx.credentials.clear()?;
    ctx.identity.clear()?;
    output(&LogoutResponse { cleared: true }, flags.format)
}
