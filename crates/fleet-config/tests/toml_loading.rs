//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use fleet_config::FleetConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_session_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[session]
storage_key = "impersonation-v2"
strict_identity = true
placeholder_name = "Ops Root"
"#,
        )?;

        let config: FleetConfig = Figment::from(Serialized::defaults(FleetConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.session.storage_key, "impersonation-v2");
        assert!(config.session.strict_identity);
        assert_eq!(config.session.placeholder_name, "Ops Root");
        assert_eq!(config.session.placeholder_email, "superadmin@fleet.local");
        Ok(())
    });
}

#[test]
fn loads_navigation_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[navigation]
company_admin_dashboard = "/company/home"
force_reload = false
reload_delay_ms = 0
"#,
        )?;

        let config: FleetConfig = Figment::from(Serialized::defaults(FleetConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.navigation.company_admin_dashboard, "/company/home");
        assert_eq!(config.navigation.super_admin_dashboard, "/super-admin/dashboard");
        assert!(!config.navigation.force_reload);
        assert_eq!(config.navigation.reload_delay_ms, 0);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
data_dir = "/from/toml"
use_keyring = true
"#,
        )?;
        jail.set_env("FLEET_STORAGE__DATA_DIR", "/from/env");
        jail.set_env("FLEET_STORAGE__USE_KEYRING", "false");

        let config: FleetConfig = Figment::from(Serialized::defaults(FleetConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("FLEET_").split("__"))
            .extract()?;

        assert_eq!(config.storage.data_dir, "/from/env");
        assert!(!config.storage.use_keyring);
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".fleet")?;
        jail.create_file(
            ".fleet/config.toml",
            r#"
[session]
storage_key = "from-project"
"#,
        )?;

        let config = FleetConfig::load().expect("config loads");
        assert_eq!(config.session.storage_key, "from-project");
        Ok(())
    });
}

#[test]
fn load_rejects_invalid_route_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("FLEET_NAVIGATION__SUPER_ADMIN_DASHBOARD", "dashboard");
        let err = FleetConfig::load().unwrap_err();
        assert!(err.to_string().contains("super_admin_dashboard"));
        Ok(())
    });
}
