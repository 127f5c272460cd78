//! Server configuration from environment variables (`.env` is honoured by the binaries).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Unset means the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Postgres schema holding the students table; `None` uses the search path.
    pub schema: Option<String>,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            schema: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read `BIND_ADDR`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`, `STUDENT_SCHEMA`, `BODY_LIMIT_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: v,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let body_limit_bytes = match var("BODY_LIMIT_BYTES") {
            Some(v) => v.parse::<usize>().map_err(|_| ConfigError::Invalid {
                key: "BODY_LIMIT_BYTES",
                value: v,
            })?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };

        let schema = match var("STUDENT_SCHEMA") {
            Some(s) if is_identifier(&s) => Some(s),
            Some(s) => return Err(ConfigError::InvalidSchema(s)),
            None => None,
        };

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            max_connections,
            schema,
            body_limit_bytes,
        })
    }
}

/// Plain PostgreSQL identifier: letter or underscore, then letters, digits, underscores.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(config_from(&[]).unwrap(), ServerConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = config_from(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "postgres://localhost/students"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("STUDENT_SCHEMA", "school"),
            ("BODY_LIMIT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/students"));
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.schema.as_deref(), Some("school"));
        assert_eq!(cfg.body_limit_bytes, 1024);
    }

    #[test]
    fn blank_database_url_means_memory_store() {
        let cfg = config_from(&[("DATABASE_URL", "   ")]).unwrap();
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { key: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            config_from(&[("STUDENT_SCHEMA", "drop table;")]),
            Err(ConfigError::InvalidSchema(_))
        ));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("_private"));
        assert!(is_identifier("school2"));
        assert!(!is_identifier("2school"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }
}
