use tollgate_auth::TokenPair;

pub use tollgate_models::auth::{AccessTokenResponse, ErrorResponse, MessageResponse};
pub use tollgate_models::users::UserCreate;

/// Response body for a freshly minted pair. The refresh token is left out.
pub fn access_response(pair: &TokenPair) -> AccessTokenResponse {
    AccessTokenResponse {
        access_token: pair.access_token.clone(),
        token_type: pair.token_type.clone(),
        access_expires_at: pair.access_expires_at,
    }
}
