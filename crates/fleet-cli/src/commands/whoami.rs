use fleet_core::Role;
use serde::Serialize;

use super::ImpersonationView;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WhoamiResponse {
    authenticated: bool,
    name: Option<String>,
    email: Option<String>,
    role: Option<Role>,
    token_source: Option<&'static str>,
    impersonation: Option<ImpersonationView>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = ctx.identity.get()?;
    let authenticated = ctx
        .credentials
        .get_active()?
        .is_some_and(|pair| pair.is_complete());

    output(
        &WhoamiResponse {
            authenticated,
            name: identity.as_ref().map(|i| i.name.clone()),
            email: identity.as_ref().map(|i| i.email.clone()),
            role: identity.map(|i| i.role),
            token_source: ctx.credential_source(),
            impersonation: ImpersonationView::from_session(&ctx.manager.session_state()),
        },
        flags.format,
    )
}
