//! Refresh cookie attributes.
//!
//! The refresh token only ever travels in an http-only cookie so client-side
//! script never sees it.
//!
//! # Environment Variables
//!
//! - `REFRESH_COOKIE_NAME`: cookie name (default `refresh_token`)
//! - `COOKIE_SECURE`: set the `Secure` attribute (default true)
//! - `COOKIE_PATH`: cookie path (default `/`)

use std::env;

use crate::parse_bool;

pub const DEFAULT_REFRESH_COOKIE_NAME: &str = "refresh_token";

/// Value written into the refresh cookie on logout.
pub const LOGOUT_SENTINEL: &str = "logout";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_REFRESH_COOKIE_NAME.to_string(),
            secure: true,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            name: lookup("REFRESH_COOKIE_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.name),
            secure: lookup("COOKIE_SECURE")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.secure),
            path: lookup("COOKIE_PATH").unwrap_or(defaults.path),
        }
    }
}
