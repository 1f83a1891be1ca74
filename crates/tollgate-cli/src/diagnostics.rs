use std::path::PathBuf;

use chrono::{DateTime, Utc};
use jsonwebtoken::Algorithm;
use tollgate_auth::{IdentityClaim, TokenIssuer, TokenKind, TokenPayload, TokenValidator};
use tollgate_config::JwtConfig;
use tollgate_core::AuthError;

/// Identity used for the throwaway tokens minted by [`check_keys`].
pub const CHECK_IDENTITY: &str = "tollgate-cli-check";

#[derive(Debug, Clone)]
pub struct KeyReport {
    pub algorithm: Algorithm,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Mints a pair with the configured private key and verifies both tokens
/// with the configured public key.
pub fn check_keys(config: &JwtConfig) -> Result<KeyReport, AuthError> {
    let issuer = TokenIssuer::from_config(config)?;
    let validator = TokenValidator::from_config(config)?;

    let pair = issuer.mint_pair(&IdentityClaim::new(CHECK_IDENTITY))?;
    validator.verify_kind(&pair.access_token, TokenKind::Access)?;
    validator.verify_kind(&pair.refresh_token, TokenKind::Refresh)?;

    Ok(KeyReport {
        algorithm: config.algorithm,
        private_key_path: config.private_key_path.clone(),
        public_key_path: config.public_key_path.clone(),
        access_expires_at: pair.access_expires_at,
        refresh_expires_at: pair.refresh_expires_at,
    })
}

/// Verifies `token` against the configured public key, optionally requiring
/// a token kind.
pub fn inspect_token(
    config: &JwtConfig,
    token: &str,
    kind: Option<TokenKind>,
) -> Result<TokenPayload, AuthError> {
    let validator = TokenValidator::from_config(config)?;
    match kind {
        Some(kind) => validator.verify_kind(token.trim(), kind),
        None => validator.verify(token.trim()),
    }
}
