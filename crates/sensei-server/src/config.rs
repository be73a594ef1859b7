//! Server configuration.
//!
//! Reads env vars (after loading `.env` if present):
//!   SENSEI_BIND_ADDR        listen address (default: 0.0.0.0:3000)
//!   SENSEI_ALLOWED_ORIGINS  comma-separated CORS allow-list
//!   SENSEI_CATALOG          optional YAML product catalog

use axum::http::HeaderValue;
use sensei_core::catalog::CatalogError;
use sensei_core::Catalog;
use std::net::SocketAddr;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://shotokankaraterebel.com",
    "https://www.shotokankaraterebel.com",
    "http://localhost:3000",
    "https://sensei-bot.vercel.app",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid SENSEI_BIND_ADDR '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid origin '{0}' in SENSEI_ALLOWED_ORIGINS")]
    Origin(String),

    #[error("SENSEI_ALLOWED_ORIGINS is set but lists no origins")]
    NoOrigins,

    #[error("product catalog: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub allowed_origins: Vec<HeaderValue>,
    pub catalog: Catalog,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .copied()
                .map(HeaderValue::from_static)
                .collect(),
            catalog: Catalog::default(),
        }
    }
}

impl ServerConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_value = lookup("SENSEI_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let allowed_origins = match lookup("SENSEI_ALLOWED_ORIGINS") {
            Some(list) => parse_origins(&list)?,
            None => ServerConfig::default().allowed_origins,
        };

        let catalog = match lookup("SENSEI_CATALOG") {
            Some(path) if !path.trim().is_empty() => Catalog::from_file(path.trim())?,
            _ => Catalog::default(),
        };

        Ok(Self {
            bind_addr,
            allowed_origins,
            catalog,
        })
    }
}

/// Split a comma-separated origin list. Each origin must be a bare
/// `scheme://host[:port]` with no path or wildcard.
pub fn parse_origins(list: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = list
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            let o = o.trim_end_matches('/');
            let valid = (o.starts_with("https://") || o.starts_with("http://"))
                && !o.contains('*')
                && !o.split_once("://").is_some_and(|(_, rest)| rest.contains('/'));
            if !valid {
                return Err(ConfigError::Origin(o.to_string()));
            }
            HeaderValue::from_str(o).map_err(|_| ConfigError::Origin(o.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::NoOrigins);
    }
    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.allowed_origins.len(), 4);
        assert_eq!(config.catalog, Catalog::default());
    }

    #[test]
    fn test_origin_override() {
        let config = ServerConfig::from_lookup(lookup(&[(
            "SENSEI_ALLOWED_ORIGINS",
            "https://dojo.example, http://localhost:5173/",
        )]))
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec![
                HeaderValue::from_static("https://dojo.example"),
                HeaderValue::from_static("http://localhost:5173"),
            ]
        );
    }

    #[test]
    fn test_rejects_wildcard_and_paths() {
        assert!(matches!(parse_origins("*"), Err(ConfigError::Origin(_))));
        assert!(matches!(
            parse_origins("https://*.example.com"),
            Err(ConfigError::Origin(_))
        ));
        assert!(matches!(
            parse_origins("https://example.com/widget"),
            Err(ConfigError::Origin(_))
        ));
        assert!(matches!(parse_origins(" , "), Err(ConfigError::NoOrigins)));
    }

    #[test]
    fn test_bad_bind_addr() {
        let result = ServerConfig::from_lookup(lookup(&[("SENSEI_BIND_ADDR", "nowhere")]));
        assert!(matches!(result, Err(ConfigError::BindAddr { .. })));
    }

    #[test]
    fn test_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "kumite:\n  name: Playbook\n  checkout_url: https://cart.example.com/k/\n  tag: tc_k"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let config = ServerConfig::from_lookup(lookup(&[("SENSEI_CATALOG", path.as_str())])).unwrap();
        assert_eq!(config.catalog.kumite.tag, "tc_k");
    }

    #[test]
    fn test_invalid_catalog_destination() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "kata:\n  name: Blueprint\n  checkout_url: not-a-url\n  tag: tc_kata_core"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let result = ServerConfig::from_lookup(lookup(&[("SENSEI_CATALOG", path.as_str())]));
        assert!(matches!(result, Err(ConfigError::Catalog(_))));
    }
}
