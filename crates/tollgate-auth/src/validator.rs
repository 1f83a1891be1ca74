//! Token verification.
//!
//! [`TokenValidator::verify`] checks the token shape, the signature under the
//! configured public key and algorithm, and expiry (no leeway). An optional
//! [`TokenGuard`] gets the final say over tokens that pass those checks.

use std::fmt;
use std::sync::Arc;

use axum_extra::extract::CookieJar;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, Validation, decode};
use tollgate_config::JwtConfig;
use tollgate_core::{AuthError, InvalidReason};

use crate::claims::{TokenKind, TokenPayload};
use crate::keys::{KeyFamily, KeySource};

/// Tokens longer than this are rejected before any decoding.
pub const MAX_TOKEN_LENGTH: usize = 8 * 1024;

/// Veto hook consulted after a token has passed signature and expiry
/// checks. Returning `false` rejects the token as revoked.
pub trait TokenGuard: Send + Sync {
    fn is_active(&self, payload: &TokenPayload) -> bool;
}

/// Guard that accepts every otherwise valid token.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl TokenGuard for AllowAll {
    fn is_active(&self, _payload: &TokenPayload) -> bool {
        true
    }
}

#[derive(Clone)]
pub struct TokenValidator {
    key: KeySource,
    algorithm: Algorithm,
    family: KeyFamily,
    guard: Arc<dyn TokenGuard>,
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenValidator")
            .field("key", &self.key)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    pub fn new(key: KeySource, algorithm: Algorithm) -> Result<Self, AuthError> {
        Ok(Self {
            key,
            algorithm,
            family: KeyFamily::for_algorithm(algorithm)?,
            guard: Arc::new(AllowAll),
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, AuthError> {
        Self::new(KeySource::file(&config.public_key_path), config.algorithm)
    }

    pub fn with_guard(mut self, guard: Arc<dyn TokenGuard>) -> Self {
        self.guard = guard;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Verifies `token` and returns its payload.
    ///
    /// # Errors
    ///
    /// - [`AuthError::KeyUnavailable`]: public key missing or unparseable
    /// - [`AuthError::TokenInvalid`]: with the reason the token was rejected
    pub fn verify(&self, token: &str) -> Result<TokenPayload, AuthError> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(reject(InvalidReason::Malformed));
        }

        let pem = self.key.read()?;
        let key = self
            .family
            .decoding_key(&pem)
            .map_err(|e| AuthError::KeyUnavailable(format!("invalid verification key: {}", e)))?;

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let payload = decode::<TokenPayload>(token, &key, &validation)
            .map_err(|e| reject(classify(e.kind())))?
            .claims;

        // Expiry must lie strictly in the future.
        if payload.exp <= Utc::now().timestamp() {
            return Err(reject(InvalidReason::Expired));
        }

        if !self.guard.is_active(&payload) {
            return Err(reject(InvalidReason::Revoked));
        }

        Ok(payload)
    }

    /// Verifies `token` and additionally requires it to be of `expected` kind.
    pub fn verify_kind(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<TokenPayload, AuthError> {
        self.verify(token)?.expect_kind(expected)
    }

    /// Reads the token from the cookie named `cookie_name` and verifies it.
    ///
    /// An absent or empty cookie is [`AuthError::MissingCredential`].
    pub fn extract_from_cookie_and_verify(
        &self,
        jar: &CookieJar,
        cookie_name: &str,
    ) -> Result<TokenPayload, AuthError> {
        let token = jar
            .get(cookie_name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AuthError::MissingCredential(cookie_name.to_string()))?;

        self.verify(token)
    }
}

fn classify(kind: &ErrorKind) -> InvalidReason {
    match kind {
        ErrorKind::ExpiredSignature => InvalidReason::Expired,
        ErrorKind::InvalidSignature => InvalidReason::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            InvalidReason::AlgorithmMismatch
        }
        _ => InvalidReason::Malformed,
    }
}

fn reject(reason: InvalidReason) -> AuthError {
    tracing::debug!(reason = %reason, "Token rejected");
    AuthError::token_invalid(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::IdentityClaim;
    use crate::issuer::TokenIssuer;
    use axum_extra::extract::cookie::Cookie;
    use chrono::Duration;

    const EC_PRIVATE_A: &[u8] = include_bytes!("../fixtures/ec_private_a.pem");
    const EC_PUBLIC_A: &[u8] = include_bytes!("../fixtures/ec_public_a.pem");
    const EC_PUBLIC_B: &[u8] = include_bytes!("../fixtures/ec_public_b.pem");
    const ED_PRIVATE: &[u8] = include_bytes!("../fixtures/ed_private.pem");
    const ED_PUBLIC: &[u8] = include_bytes!("../fixtures/ed_public.pem");

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(KeySource::pem(EC_PRIVATE_A), Algorithm::ES256).unwrap()
    }

    fn validator() -> TokenValidator {
        TokenValidator::new(KeySource::pem(EC_PUBLIC_A), Algorithm::ES256).unwrap()
    }

    fn claim() -> IdentityClaim {
        IdentityClaim::new("user-1").with("username", "alice").unwrap()
    }

    #[test]
    fn test_verify_round_trip() {
        let issued = issuer().mint(&claim(), TokenKind::Access, 15).unwrap();
        let payload = validator().verify(&issued.token).unwrap();

        assert_eq!(payload.claim, claim());
        assert_eq!(payload.kind, TokenKind::Access);
        assert_eq!(payload.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_verify_wrong_public_key() {
        let issued = issuer().mint(&claim(), TokenKind::Access, 15).unwrap();
        let other = TokenValidator::new(KeySource::pem(EC_PUBLIC_B), Algorithm::ES256).unwrap();

        let err = other.verify(&issued.token).unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::BadSignature));
    }

    #[test]
    fn test_verify_garbage() {
        for token in ["invalid.token.here", "", "not-a-jwt", "a.b"] {
            let err = validator().verify(token).unwrap_err();
            assert_eq!(err.reason(), Some(InvalidReason::Malformed), "{token:?}");
        }
    }

    #[test]
    fn test_verify_oversized_token() {
        let token = "a".repeat(MAX_TOKEN_LENGTH + 1);
        let err = validator().verify(&token).unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::Malformed));
    }

    #[test]
    fn test_verify_expired() {
        let issued = issuer()
            .mint_at(
                &claim(),
                TokenKind::Access,
                15,
                Utc::now() - Duration::hours(1),
            )
            .unwrap();

        let err = validator().verify(&issued.token).unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::Expired));
    }

    #[test]
    fn test_verify_expiring_now_is_expired() {
        let issued = issuer()
            .mint_at(
                &claim(),
                TokenKind::Access,
                1,
                Utc::now() - Duration::minutes(1),
            )
            .unwrap();

        let err = validator().verify(&issued.token).unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::Expired));
    }

    #[test]
    fn test_verify_algorithm_mismatch() {
        let issued = issuer().mint(&claim(), TokenKind::Access, 15).unwrap();
        let es384 = TokenValidator::new(KeySource::pem(EC_PUBLIC_A), Algorithm::ES384).unwrap();

        let err = es384.verify(&issued.token).unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::AlgorithmMismatch));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let issued = issuer().mint(&claim(), TokenKind::Access, 15).unwrap();
        let other = issuer()
            .mint(&IdentityClaim::new("user-2"), TokenKind::Access, 15)
            .unwrap();

        // Splice the second token's payload under the first token's signature
        let first: Vec<&str> = issued.token.split('.').collect();
        let second: Vec<&str> = other.token.split('.').collect();
        let forged = format!("{}.{}.{}", first[0], second[1], first[2]);

        let err = validator().verify(&forged).unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::BadSignature));
    }

    #[test]
    fn test_verify_missing_public_key() {
        let issued = issuer().mint(&claim(), TokenKind::Access, 15).unwrap();
        let missing =
            TokenValidator::new(KeySource::file("/nonexistent/tollgate/pub.pem"), Algorithm::ES256)
                .unwrap();

        let err = missing.verify(&issued.token).unwrap_err();
        assert!(matches!(err, AuthError::KeyUnavailable(_)));
    }

    #[test]
    fn test_verify_unparseable_public_key() {
        let issued = issuer().mint(&claim(), TokenKind::Access, 15).unwrap();
        let broken =
            TokenValidator::new(KeySource::pem(b"garbage".to_vec()), Algorithm::ES256).unwrap();

        let err = broken.verify(&issued.token).unwrap_err();
        assert!(matches!(err, AuthError::KeyUnavailable(_)));
    }

    #[test]
    fn test_verify_kind() {
        let pair = issuer().mint_pair(&claim()).unwrap();
        let validator = validator();

        assert!(validator.verify_kind(&pair.access_token, TokenKind::Access).is_ok());
        assert!(validator.verify_kind(&pair.refresh_token, TokenKind::Refresh).is_ok());

        let err = validator
            .verify_kind(&pair.refresh_token, TokenKind::Access)
            .unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::WrongKind));
    }

    #[derive(Debug)]
    struct DenyJti(String);

    impl TokenGuard for DenyJti {
        fn is_active(&self, payload: &TokenPayload) -> bool {
            payload.jti != self.0
        }
    }

    #[test]
    fn test_guard_rejects_revoked() {
        let issuer = issuer();
        let revoked = issuer.mint(&claim(), TokenKind::Refresh, 60).unwrap();
        let kept = issuer.mint(&claim(), TokenKind::Refresh, 60).unwrap();

        let jti = validator().verify(&revoked.token).unwrap().jti;
        let guarded = validator().with_guard(Arc::new(DenyJti(jti)));

        let err = guarded.verify(&revoked.token).unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::Revoked));
        assert!(guarded.verify(&kept.token).is_ok());
    }

    #[test]
    fn test_extract_from_cookie() {
        let pair = issuer().mint_pair(&claim()).unwrap();
        let jar = CookieJar::new().add(Cookie::new("refresh_token", pair.refresh_token));

        let payload = validator()
            .extract_from_cookie_and_verify(&jar, "refresh_token")
            .unwrap();
        assert_eq!(payload.kind, TokenKind::Refresh);
        assert_eq!(payload.claim.id(), "user-1");
    }

    #[test]
    fn test_extract_from_cookie_missing() {
        let jar = CookieJar::new().add(Cookie::new("other", "value"));
        let err = validator()
            .extract_from_cookie_and_verify(&jar, "refresh_token")
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential(ref name) if name == "refresh_token"));
    }

    #[test]
    fn test_extract_from_cookie_empty() {
        let jar = CookieJar::new().add(Cookie::new("refresh_token", ""));
        let err = validator()
            .extract_from_cookie_and_verify(&jar, "refresh_token")
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential(_)));
    }

    #[test]
    fn test_extract_from_cookie_logout_sentinel() {
        let jar = CookieJar::new().add(Cookie::new("refresh_token", "logout"));
        let err = validator()
            .extract_from_cookie_and_verify(&jar, "refresh_token")
            .unwrap_err();
        assert_eq!(err.reason(), Some(InvalidReason::Malformed));
    }

    #[test]
    fn test_eddsa_round_trip() {
        let issuer = TokenIssuer::new(KeySource::pem(ED_PRIVATE), Algorithm::EdDSA).unwrap();
        let validator = TokenValidator::new(KeySource::pem(ED_PUBLIC), Algorithm::EdDSA).unwrap();

        let issued = issuer.mint(&claim(), TokenKind::Refresh, 15).unwrap();
        let payload = validator.verify(&issued.token).unwrap();
        assert_eq!(payload.claim.id(), "user-1");
    }
}
