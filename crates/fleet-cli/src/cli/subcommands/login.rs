use clap::Args;

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    /// Access token issued by the auth service.
    #[arg(long, env = "FLEET_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,
    /// Refresh token issued by the auth service.
    #[arg(long, env = "FLEET_REFRESH_TOKEN", hide_env_values = true)]
    pub refresh_token: String,
    /// Display name of the user.
    #[arg(long)]
    pub name: String,
    /// Email of the user.
    #[arg(long)]
    pub email: String,
    /// Role of the user (super-admin, admin, manager, employee).
    #[arg(long, default_value = "super-admin")]
    pub role: String,
}
