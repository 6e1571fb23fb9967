mod impersonate;
mod login;
mod logout;
mod whoami;

use serde::Serialize;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Login(args) => login::handle(args, ctx, flags),
        Commands::Logout => logout::handle(ctx, flags),
        Commands::Whoami => whoami::handle(ctx, flags),
        Commands::Impersonate { action } => impersonate::handle(action, ctx, flags),
    }
}

/// Impersonation details shared by several responses.
#[derive(Serialize)]
struct ImpersonationView {
    company_id: String,
    company_name: String,
    original_user: String,
    original_email: String,
    started_at: Option<String>,
}

impl ImpersonationView {
    fn from_session(session: &fleet_core::ImpersonationSession) -> Option<Self> {
        let company = session.impersonated_company()?;
        let original = session.original_user()?;
        Some(Self {
            company_id: company.id.clone(),
            company_name: company.name.clone(),
            original_user: original.identity.name.clone(),
            original_email: original.identity.email.clone(),
            started_at: session.started_at().map(|t| t.to_rfc3339()),
        })
    }
}
