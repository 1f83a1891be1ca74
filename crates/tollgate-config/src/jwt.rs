//! Token signing configuration.
//!
//! Keys are asymmetric and live on disk as PEM files: a PKCS#8 private key
//! for signing and an SPKI public key for verification.
//!
//! # Environment Variables
//!
//! - `JWT_PRIV_KEY_PATH`: private key path (default `JWT_EC_PRIVKEY.pem`)
//! - `JWT_PUB_KEY_PATH`: public key path (default `JWT_EC_PUBKEY.pem`)
//! - `JWT_ALGO`: signing algorithm (default `ES256`)
//! - `JWT_ACCESS_EXPIRES_MINUTES`: access token lifetime (default 15)
//! - `JWT_REFRESH_EXPIRES_MINUTES`: refresh token lifetime (default 2880)
//! - `JWT_ROTATE_REFRESH_COOKIE`: re-set the refresh cookie on refresh (default false)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use crate::{ConfigError, parse_bool};

pub const DEFAULT_ACCESS_EXPIRY_MINUTES: i64 = 15;
pub const DEFAULT_REFRESH_EXPIRY_MINUTES: i64 = 2880;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub algorithm: Algorithm,
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_minutes: i64,
    /// When true, `/refresh` writes the newly minted refresh token back into
    /// the cookie. When false the new refresh token is discarded and the
    /// presented one stays in place until its own expiry.
    pub rotate_refresh_cookie: bool,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            private_key_path: PathBuf::from("JWT_EC_PRIVKEY.pem"),
            public_key_path: PathBuf::from("JWT_EC_PUBKEY.pem"),
            algorithm: Algorithm::ES256,
            access_token_expiry_minutes: DEFAULT_ACCESS_EXPIRY_MINUTES,
            refresh_token_expiry_minutes: DEFAULT_REFRESH_EXPIRY_MINUTES,
            rotate_refresh_cookie: false,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset keys take their
    /// defaults; set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let algorithm = match lookup("JWT_ALGO") {
            Some(value) => Algorithm::from_str(value.trim()).map_err(|_| ConfigError::Invalid {
                key: "JWT_ALGO",
                value,
            })?,
            None => defaults.algorithm,
        };

        let config = Self {
            private_key_path: lookup("JWT_PRIV_KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.private_key_path),
            public_key_path: lookup("JWT_PUB_KEY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_key_path),
            algorithm,
            access_token_expiry_minutes: parse_minutes(
                &lookup,
                "JWT_ACCESS_EXPIRES_MINUTES",
                defaults.access_token_expiry_minutes,
            )?,
            refresh_token_expiry_minutes: parse_minutes(
                &lookup,
                "JWT_REFRESH_EXPIRES_MINUTES",
                defaults.refresh_token_expiry_minutes,
            )?,
            rotate_refresh_cookie: lookup("JWT_ROTATE_REFRESH_COOKIE")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.rotate_refresh_cookie),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_symmetric(self.algorithm) {
            return Err(ConfigError::Unsupported(format!(
                "{:?} is a shared-secret algorithm; an asymmetric key pair is required",
                self.algorithm
            )));
        }
        if self.access_token_expiry_minutes <= 0 {
            return Err(ConfigError::Unsupported(
                "access token expiry must be positive".to_string(),
            ));
        }
        if self.refresh_token_expiry_minutes <= self.access_token_expiry_minutes {
            return Err(ConfigError::Unsupported(
                "refresh token expiry must be longer than access token expiry".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn is_symmetric(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

fn parse_minutes<F>(lookup: &F, key: &'static str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
