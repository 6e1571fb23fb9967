use anyhow::Context;
use fleet_core::{AdminData, CredentialPair, IdentitySummary, Role};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ImpersonateStartArgs;
use crate::commands::ImpersonationView;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StartResponse {
    impersonating: bool,
    acting_as: String,
    route: String,
    session: Option<ImpersonationView>,
}

pub fn handle(
    args: &ImpersonateStartArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let role: Role = args.admin_role.parse()?;
    let admin = AdminData {
        identity: IdentitySummary::new(args.admin_name.clone(), args.admin_email.clone(), role),
        tokens: CredentialPair::new(args.access_token.clone(), args.refresh_token.clone()),
    };

    ctx.manager
        .start_impersonation(&args.company_id, &args.company_name, admin)
        .context("impersonate start")?;

    output(
        &StartResponse {
            impersonating: true,
            acting_as: args.admin_name.clone(),
            route: ctx.config.navigation.company_admin_dashboard.clone(),
            session: ImpersonationView::from_session(&ctx.manager.session_state()),
        },
        flags.format,
    )
}
