pub mod impersonate;
pub mod login;

pub use impersonate::{ImpersonateCommands, ImpersonateStartArgs};
pub use login::LoginArgs;
