use fleet_core::{CredentialPair, IdentitySummary, Role};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct LoginResponse {
    authenticated: bool,
    name: String,
    email: String,
    role: Role,
}

pub fn handle(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(company) = ctx.manager.session_state().impersonated_company() {
        anyhow::bail!(
            "login: currently impersonating {} ({}); run `fleet impersonate end` first",
            company.name,
            company.id
        );
    }

    let role: Role = args.role.parse()?;
    let tokens = CredentialPair::new(args.access_token.clone(), args.refresh_token.clone());
    if !tokens.is_complete() {
        anyhow::bail!("login: access and refresh tokens must not be empty");
    }
    let identity = IdentitySummary::new(args.name.clone(), args.email.clone(), role);

    ctx.credentials.set_active(&tokens)?;
    ctx.identity.set(&identity)?;
    tracing::info!(role = %role, "stored active credentials");

    output(
        &LoginResponse {
            authenticated: true,
            name: identity.name,
            email: identity.email,
            role,
        },
        flags.format,
    )
}
