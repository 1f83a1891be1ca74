//! Key material handling.
//!
//! Keys are read every time they are used, so a key file swapped on disk
//! takes effect on the next mint or verify without a restart.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use tollgate_core::AuthError;

/// Where PEM-encoded key bytes come from.
#[derive(Clone)]
pub enum KeySource {
    File(PathBuf),
    Pem(Arc<[u8]>),
}

impl KeySource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        KeySource::File(path.into())
    }

    pub fn pem(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        KeySource::Pem(Arc::from(bytes))
    }

    /// Returns the raw PEM bytes.
    pub fn read(&self) -> Result<Cow<'_, [u8]>, AuthError> {
        match self {
            KeySource::File(path) => std::fs::read(path).map(Cow::Owned).map_err(|e| {
                AuthError::KeyUnavailable(format!("cannot read {}: {}", path.display(), e))
            }),
            KeySource::Pem(bytes) => Ok(Cow::Borrowed(&bytes[..])),
        }
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::File(path) => f.debug_tuple("File").field(path).finish(),
            KeySource::Pem(bytes) => write!(f, "Pem(<{} bytes>)", bytes.len()),
        }
    }
}

/// Key type an algorithm signs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Ec,
    Rsa,
    Ed,
}

impl KeyFamily {
    /// Shared-secret algorithms have no key family and are refused.
    pub fn for_algorithm(algorithm: Algorithm) -> Result<Self, AuthError> {
        match algorithm {
            Algorithm::ES256 | Algorithm::ES384 => Ok(KeyFamily::Ec),
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => Ok(KeyFamily::Rsa),
            Algorithm::EdDSA => Ok(KeyFamily::Ed),
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Err(
                AuthError::SigningError(format!("{:?} requires an asymmetric key pair", algorithm)),
            ),
        }
    }

    pub(crate) fn encoding_key(&self, pem: &[u8]) -> jsonwebtoken::errors::Result<EncodingKey> {
        match self {
            KeyFamily::Ec => EncodingKey::from_ec_pem(pem),
            KeyFamily::Rsa => EncodingKey::from_rsa_pem(pem),
            KeyFamily::Ed => EncodingKey::from_ed_pem(pem),
        }
    }

    pub(crate) fn decoding_key(&self, pem: &[u8]) -> jsonwebtoken::errors::Result<DecodingKey> {
        match self {
            KeyFamily::Ec => DecodingKey::from_ec_pem(pem),
            KeyFamily::Rsa => DecodingKey::from_rsa_pem(pem),
            KeyFamily::Ed => DecodingKey::from_ed_pem(pem),
        }
    }
}
