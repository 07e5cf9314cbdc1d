//! Server configuration.
//!
//! Reads a TOML file resolved from the `-c` flag: a bare context name
//! becomes `/etc/orderdesk/<name>.toml`; anything with `/` or `.` is
//! used as a path directly.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use orderdesk_orders::service::WorksheetNames;
use orderdesk_sheet::gsheets::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the HTTP server.
    #[serde(default = "default_listen")]
    pub listen: String,

    pub sheets: SheetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet key, as it appears in the sheet URL.
    pub spreadsheet_id: String,

    /// API base URL. Override for gateways and tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Pre-obtained bearer token; empty means anonymous access.
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub worksheets: WorksheetsConfig,
}

/// Worksheet title overrides; anything unset keeps its default name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorksheetsConfig {
    pub orders: Option<String>,
    pub dispatch: Option<String>,
    pub products: Option<String>,
    pub companies: Option<String>,
    pub brands: Option<String>,
    pub requirement: Option<String>,
}

impl WorksheetsConfig {
    pub fn names(&self) -> WorksheetNames {
        let defaults = WorksheetNames::default();
        WorksheetNames {
            orders: self.orders.clone().unwrap_or(defaults.orders),
            dispatch: self.dispatch.clone().unwrap_or(defaults.dispatch),
            products: self.products.clone().unwrap_or(defaults.products),
            companies: self.companies.clone().unwrap_or(defaults.companies),
            brands: self.brands.clone().unwrap_or(defaults.brands),
            requirement: self.requirement.clone().unwrap_or(defaults.requirement),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ServerConfig {
    /// Resolve a context name or path to a config file path.
    pub fn resolve_path(config: &str) -> PathBuf {
        if config.contains('/') || config.contains('.') {
            PathBuf::from(config)
        } else {
            PathBuf::from(format!("/etc/orderdesk/{config}.toml"))
        }
    }

    /// Load config from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [sheets]
            spreadsheet_id = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(config.listen, "0.0.0.0:8000");
        assert_eq!(config.sheets.base_url, DEFAULT_BASE_URL);
        assert!(config.sheets.token.is_empty());
        assert_eq!(config.sheets.worksheets.names().orders, "orders");
    }

    #[test]
    fn worksheet_overrides_apply() {
        let config: ServerConfig = toml::from_str(
            r#"
            listen = "127.0.0.1:9000"

            [sheets]
            spreadsheet_id = "abc123"
            token = "ya29.token"

            [sheets.worksheets]
            orders = "sales"
            "#,
        )
        .unwrap();
        let names = config.sheets.worksheets.names();
        assert_eq!(names.orders, "sales");
        assert_eq!(names.dispatch, "dispatch");
        assert_eq!(config.listen, "127.0.0.1:9000");
    }

    #[test]
    fn resolve_path_handles_names_and_paths() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/orderdesk/prod.toml"),
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml"),
        );
    }
}
