//! Listener and process settings.
//!
//! # Environment Variables
//!
//! - `DEBUG`: development mode (default false); binds to loopback
//! - `HOST`: bind host (default `0.0.0.0`, or `127.0.0.1` in debug mode)
//! - `PORT`: bind port (default 8000)

use std::env;

use crate::parse_bool;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = lookup("DEBUG").map(|v| parse_bool(&v)).unwrap_or(false);
        let default_host = if debug { "127.0.0.1" } else { "0.0.0.0" };

        Self {
            host: lookup("HOST").unwrap_or_else(|| default_host.to_string()),
            port: lookup("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(8000),
            debug,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
        assert!(!config.debug);
    }

    #[test]
    fn test_debug_binds_loopback() {
        let config = ServerConfig::from_lookup(|key| match key {
            "DEBUG" => Some("1".to_string()),
            "PORT" => Some("9100".to_string()),
            _ => None,
        });
        assert_eq!(config.bind_address(), "127.0.0.1:9100");
    }
}
