//! Access-control configuration.

use serde::Deserialize;

use rolegate_core::RoleName;

/// Environment variable naming the administrator role.
pub const ADMIN_ROLE_ENV: &str = "ROLEGATE_ADMIN_ROLE";

/// Default administrator role name.
pub const DEFAULT_ADMIN_ROLE: &str = RoleName::DEFAULT_ADMIN;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Role whose holders may update other users' roles, and of which at
    /// least one holder must always remain.
    pub admin_role: RoleName,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        Self {
            admin_role: RoleName::default_admin(),
        }
    }
}

impl AccessControlConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unset or blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_role = lookup(ADMIN_ROLE_ENV)
            .and_then(|v| RoleName::new(v).ok())
            .unwrap_or_else(RoleName::default_admin);

        Self { admin_role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_admin() {
        let config = AccessControlConfig::default();
        assert_eq!(config.admin_role.as_str(), DEFAULT_ADMIN_ROLE);
        assert!(config.admin_role.matches("admin"));
    }

    #[test]
    fn lookup_overrides_admin_role() {
        let config = AccessControlConfig::from_lookup(|key| {
            (key == ADMIN_ROLE_ENV).then(|| "Principal".to_string())
        });
        assert_eq!(config.admin_role.as_str(), "Principal");
    }

    #[test]
    fn blank_value_falls_back_to_default() {
        let config = AccessControlConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, AccessControlConfig::default());
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: AccessControlConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.admin_role.as_str(), "Admin");

        let config: AccessControlConfig =
            serde_json::from_str(r#"{ "admin_role": "superuser" }"#).unwrap();
        assert!(config.admin_role.matches("SuperUser"));
    }
}
