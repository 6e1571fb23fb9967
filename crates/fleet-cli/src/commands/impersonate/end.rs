use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct EndResponse {
    impersonating: bool,
    restored_user: Option<String>,
    route: String,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.manager.end_impersonation().context("impersonate end")?;

    output(
        &EndResponse {
            impersonating: false,
            restored_user: ctx.identity.get()?.map(|i| i.name),
            route: ctx.config.navigation.super_admin_dashboard.clone(),
        },
        flags.format,
    )
}
