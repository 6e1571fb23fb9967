use clap::Subcommand;

use super::subcommands::{ImpersonateCommands, LoginArgs};

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Store the active credentials and identity issued by the auth service.
    Login(LoginArgs),
    /// Clear the active credentials and cached identity.
    Logout,
    /// Show the current identity and impersonation status.
    Whoami,
    /// Act as a company administrator.
    Impersonate {
        #[command(subcommand)]
        action: ImpersonateCommands,
    },
}
