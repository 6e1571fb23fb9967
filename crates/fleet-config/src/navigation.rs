//! Dashboard routes and post-swap navigation behaviour.

use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_super_admin_dashboard() -> String {
    "/super-admin/dashboard".into()
}

fn default_company_admin_dashboard() -> String {
    "/admin/dashboard".into()
}

const fn default_force_reload() -> bool {
    true
}

const fn default_reload_delay_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NavigationConfig {
    /// Route shown after an impersonation ends.
    #[serde(default = "default_super_admin_dashboard")]
    pub super_admin_dashboard: String,

    /// Route shown after an impersonation starts.
    #[serde(default = "default_company_admin_dashboard")]
    pub company_admin_dashboard: String,

    /// Follow navigation with a full reload of the target route. Disable once
    /// every identity consumer listens for change notifications.
    #[serde(default = "default_force_reload")]
    pub force_reload: bool,

    /// Delay between navigation and the forced reload, in milliseconds.
    #[serde(default = "default_reload_delay_ms")]
    pub reload_delay_ms: u64,
}

impl NavigationConfig {
    #[must_use]
    pub const fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            super_admin_dashboard: default_super_admin_dashboard(),
            company_admin_dashboard: default_company_admin_dashboard(),
            force_reload: default_force_reload(),
            reload_delay_ms: default_reload_delay_ms(),
        }
    }
}
