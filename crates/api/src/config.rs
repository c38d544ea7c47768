//! Process configuration, read once at startup and immutable afterwards.

use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8893;

/// Policy applied by the enforcement middleware when a credential is missing
/// or invalid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnforcementMode {
    /// Reject: 401 when absent, 403 when invalid.
    Strict,
    /// Always continue; annotate the request with the outcome.
    Flexible,
}

impl FromStr for EnforcementMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(EnforcementMode::Strict),
            "flexible" => Ok(EnforcementMode::Flexible),
            _ => Err(ConfigError::Invalid {
                key: "AUTH_MODE",
                value: s.to_string(),
                expected: "strict | flexible",
            }),
        }
    }
}

impl core::fmt::Display for EnforcementMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EnforcementMode::Strict => f.write_str("strict"),
            EnforcementMode::Flexible => f.write_str("flexible"),
        }
    }
}

/// Whether the middleware is installed at all, and if so in which mode.
///
/// `Disabled` means no middleware in the pipeline, not a pass-through one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Enforcement {
    Disabled,
    Enabled(EnforcementMode),
}

impl Enforcement {
    pub fn from_toggle(enabled: bool, mode: EnforcementMode) -> Self {
        if enabled {
            Enforcement::Enabled(mode)
        } else {
            Enforcement::Disabled
        }
    }
}

impl core::fmt::Display for Enforcement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Enforcement::Disabled => f.write_str("disabled"),
            Enforcement::Enabled(mode) => core::fmt::Display::fmt(mode, f),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key}={value:?} (expected {expected})")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Clone)]
pub struct GateConfig {
    /// Shared HS256 signing secret.
    pub jwt_secret: String,
    pub enforcement: Enforcement,
    pub bind_addr: SocketAddr,
}

impl GateConfig {
    pub fn new(jwt_secret: impl Into<String>, enforcement: Enforcement) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            enforcement,
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
        }
    }

    /// Read `JWT_SECRET`, `AUTH_ENABLED`, `AUTH_MODE` and `PORT` from the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let enabled = match lookup("AUTH_ENABLED") {
            None => true,
            Some(v) => parse_bool("AUTH_ENABLED", &v)?,
        };

        let mode = match lookup("AUTH_MODE") {
            None => EnforcementMode::Strict,
            Some(v) => v.parse()?,
        };

        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: v.clone(),
                expected: "a TCP port number",
            })?,
        };

        Ok(Self {
            jwt_secret,
            enforcement: Enforcement::from_toggle(enabled, mode),
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
        })
    }
}

impl core::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GateConfig")
            .field("jwt_secret", &"<redacted>")
            .field("enforcement", &self.enforcement)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            expected: "a boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GateConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GateConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
        assert_eq!(
            load(&[("JWT_SECRET", "")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn defaults_to_strict_on_8893() {
        let cfg = load(&[("JWT_SECRET", "s")]).unwrap();
        assert_eq!(cfg.enforcement, Enforcement::Enabled(EnforcementMode::Strict));
        assert_eq!(cfg.bind_addr.port(), 8893);
    }

    #[test]
    fn toggle_and_mode_combine() {
        let cfg = load(&[("JWT_SECRET", "s"), ("AUTH_MODE", "Flexible")]).unwrap();
        assert_eq!(cfg.enforcement, Enforcement::Enabled(EnforcementMode::Flexible));

        let cfg = load(&[
            ("JWT_SECRET", "s"),
            ("AUTH_ENABLED", "false"),
            ("AUTH_MODE", "strict"),
        ])
        .unwrap();
        assert_eq!(cfg.enforcement, Enforcement::Disabled);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("AUTH_MODE", "lenient")]),
            Err(ConfigError::Invalid { key: "AUTH_MODE", .. })
        ));
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("AUTH_ENABLED", "maybe")]),
            Err(ConfigError::Invalid { key: "AUTH_ENABLED", .. })
        ));
        assert!(matches!(
            load(&[("JWT_SECRET", "s"), ("PORT", "99999")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let cfg = GateConfig::new("super-secret", Enforcement::Disabled);
        assert!(!format!("{cfg:?}").contains("super-secret"));
    }
}
