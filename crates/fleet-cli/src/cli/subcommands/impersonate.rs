use clap::{Args, Subcommand};

/// Impersonation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ImpersonateCommands {
    /// Assume a company administrator's credentials and identity.
    Start(ImpersonateStartArgs),
    /// Return to the original identity.
    End,
    /// Show the current impersonation session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct ImpersonateStartArgs {
    /// Company to impersonate.
    #[arg(long)]
    pub company_id: String,
    /// Company display name.
    #[arg(long)]
    pub company_name: String,
    /// Company admin access token.
    #[arg(long, hide_env_values = true, env = "FLEET_ADMIN_ACCESS_TOKEN")]
    pub access_token: String,
    /// Company admin refresh token.
    #[arg(long, hide_env_values = true, env = "FLEET_ADMIN_REFRESH_TOKEN")]
    pub refresh_token: String,
    /// Company admin display name.
    #[arg(long)]
    pub admin_name: String,
    /// Company admin email.
    #[arg(long)]
    pub admin_email: String,
    /// Company admin role.
    #[arg(long, default_value = "admin")]
    pub admin_role: String,
}
