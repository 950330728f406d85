//! TOML-backed application configuration.
//!
//! Loaded from `~/.config/saas-admin/config.toml` by default; the
//! `SAAS_ADMIN_CONFIG` environment variable overrides the path.
//! Every key is optional: missing sections fall back to defaults so a
//! bare install boots without a config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default location: `<config dir>/saas-admin/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("saas-admin")
        .join("config.toml")
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        toml::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
    }
}

/// HTTP server bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Logging configuration. `level` accepts any `tracing` directive
/// string ("info", "debug", "saas_admin=debug,tower_http=warn", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Session token parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Lifetime of an issued session token, in hours.
    pub token_ttl_hours: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { token_ttl_hours: 24 }
    }
}

/// Bootstrap super-admin account, created on startup only when the
/// user store is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            name: "Super Admin".to_string(),
            email: "superadmin@example.com".to_string(),
            password: "12345678".to_string(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
