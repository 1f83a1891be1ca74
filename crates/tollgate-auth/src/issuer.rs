//! Token minting.
//!
//! A [`TokenIssuer`] signs [`TokenPayload`]s with the private key. The key
//! is re-read for every mint, which keeps the issuer cheap to clone and
//! share across handlers.
//!
//! # Example
//!
//! ```ignore
//! use tollgate_auth::{IdentityClaim, KeySource, TokenIssuer};
//! use jsonwebtoken::Algorithm;
//!
//! let issuer = TokenIssuer::new(KeySource::file("JWT_EC_PRIVKEY.pem"), Algorithm::ES256)?;
//! let pair = issuer.mint_pair(&IdentityClaim::new(user.id.clone()))?;
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header, encode};
use tollgate_config::JwtConfig;
use tollgate_config::jwt::{DEFAULT_ACCESS_EXPIRY_MINUTES, DEFAULT_REFRESH_EXPIRY_MINUTES};
use tollgate_core::AuthError;
use uuid::Uuid;

use crate::claims::{
    IdentityClaim, IssuedToken, TOKEN_TYPE_BEARER, TokenKind, TokenPair, TokenPayload,
};
use crate::keys::{KeyFamily, KeySource};

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: KeySource,
    algorithm: Algorithm,
    family: KeyFamily,
    access_minutes: i64,
    refresh_minutes: i64,
}

impl TokenIssuer {
    /// Creates an issuer with the default lifetimes (15 minutes access,
    /// 2880 minutes refresh).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SigningError`] for shared-secret algorithms.
    pub fn new(key: KeySource, algorithm: Algorithm) -> Result<Self, AuthError> {
        Ok(Self {
            key,
            algorithm,
            family: KeyFamily::for_algorithm(algorithm)?,
            access_minutes: DEFAULT_ACCESS_EXPIRY_MINUTES,
            refresh_minutes: DEFAULT_REFRESH_EXPIRY_MINUTES,
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, AuthError> {
        Self::new(KeySource::file(&config.private_key_path), config.algorithm)?.with_expiries(
            config.access_token_expiry_minutes,
            config.refresh_token_expiry_minutes,
        )
    }

    /// Overrides the pair lifetimes used by [`mint_pair`](Self::mint_pair).
    ///
    /// Both must be positive and the refresh lifetime must be strictly longer
    /// than the access lifetime.
    pub fn with_expiries(
        mut self,
        access_minutes: i64,
        refresh_minutes: i64,
    ) -> Result<Self, AuthError> {
        ensure_positive(access_minutes)?;
        ensure_positive(refresh_minutes)?;
        if refresh_minutes <= access_minutes {
            return Err(AuthError::InvalidInput(format!(
                "refresh expiry ({} minutes) must be longer than access expiry ({} minutes)",
                refresh_minutes, access_minutes
            )));
        }
        self.access_minutes = access_minutes;
        self.refresh_minutes = refresh_minutes;
        Ok(self)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn access_minutes(&self) -> i64 {
        self.access_minutes
    }

    pub fn refresh_minutes(&self) -> i64 {
        self.refresh_minutes
    }

    /// Mints one token of `kind` for `claim`, valid for `expiry_minutes`
    /// from now.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidInput`]: non-positive expiry or empty claim id
    /// - [`AuthError::KeyUnavailable`]: private key could not be read
    /// - [`AuthError::SigningError`]: key does not fit the algorithm
    pub fn mint(
        &self,
        claim: &IdentityClaim,
        kind: TokenKind,
        expiry_minutes: i64,
    ) -> Result<IssuedToken, AuthError> {
        self.mint_at(claim, kind, expiry_minutes, Utc::now())
    }

    /// Same as [`mint`](Self::mint) with an explicit issue time.
    pub fn mint_at(
        &self,
        claim: &IdentityClaim,
        kind: TokenKind,
        expiry_minutes: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        ensure_positive(expiry_minutes)?;
        claim.validate()?;

        let iat = issued_at.timestamp();
        let exp = expiry_minutes
            .checked_mul(60)
            .and_then(|secs| iat.checked_add(secs))
            .ok_or_else(|| AuthError::InvalidInput("token expiry out of range".to_string()))?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| AuthError::InvalidInput("token expiry out of range".to_string()))?;

        let payload = TokenPayload {
            claim: claim.clone(),
            kind,
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        let pem = self.key.read()?;
        let key = self
            .family
            .encoding_key(&pem)
            .map_err(|e| AuthError::SigningError(format!("invalid signing key: {}", e)))?;

        let token = encode(&Header::new(self.algorithm), &payload, &key)
            .map_err(|e| AuthError::SigningError(e.to_string()))?;

        tracing::debug!(
            id = %claim.id(),
            kind = %kind,
            jti = %payload.jti,
            "Token minted"
        );

        Ok(IssuedToken {
            token,
            kind,
            expires_at,
        })
    }

    /// Mints an access and a refresh token for the same claim using the
    /// configured lifetimes.
    pub fn mint_pair(&self, claim: &IdentityClaim) -> Result<TokenPair, AuthError> {
        self.mint_pair_with(claim, self.access_minutes, self.refresh_minutes)
    }

    pub fn mint_pair_with(
        &self,
        claim: &IdentityClaim,
        access_minutes: i64,
        refresh_minutes: i64,
    ) -> Result<TokenPair, AuthError> {
        let issued_at = Utc::now();
        let access = self.mint_at(claim, TokenKind::Access, access_minutes, issued_at)?;
        let refresh = self.mint_at(claim, TokenKind::Refresh, refresh_minutes, issued_at)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }
}

fn ensure_positive(minutes: i64) -> Result<(), AuthError> {
    if minutes <= 0 {
        return Err(AuthError::InvalidInput(format!(
            "token expiry must be positive, got {} minutes",
            minutes
        )));
    }
    Ok(())
}
