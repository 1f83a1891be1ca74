//! # Tollgate Auth
//!
//! Asymmetric-key token issuance and validation.
//!
//! - [`claims`]: identity claim, token kinds and payload
//! - [`keys`]: PEM key sources and key families
//! - [`issuer`]: [`TokenIssuer`] mints access/refresh tokens with the private key
//! - [`validator`]: [`TokenValidator`] verifies tokens with the public key
//!
//! # Example
//!
//! ```ignore
//! use tollgate_auth::{IdentityClaim, TokenIssuer, TokenKind, TokenValidator};
//!
//! let issuer = TokenIssuer::from_config(&jwt_config)?;
//! let validator = TokenValidator::from_config(&jwt_config)?;
//!
//! let pair = issuer.mint_pair(&IdentityClaim::new("user-1"))?;
//! let payload = validator.verify_kind(&pair.refresh_token, TokenKind::Refresh)?;
//! ```

pub mod claims;
pub mod issuer;
pub mod keys;
pub mod validator;

pub use claims::{
    IdentityClaim, IssuedToken, RESERVED_CLAIMS, TOKEN_TYPE_BEARER, TokenKind, TokenPair,
    TokenPayload,
};
pub use issuer::TokenIssuer;
pub use keys::{KeyFamily, KeySource};
pub use validator::{AllowAll, MAX_TOKEN_LENGTH, TokenGuard, TokenValidator};
