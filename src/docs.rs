use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use tollgate_config::cookie::DEFAULT_REFRESH_COOKIE_NAME;
use tollgate_models::{AccessTokenResponse, ErrorResponse, MessageResponse, UserCreate, UserProfile};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::join,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::users::controller::get_profile,
    ),
    components(
        schemas(
            UserCreate,
            UserProfile,
            AccessTokenResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and token refresh"),
        (name = "Users", description = "Authenticated user endpoints")
    ),
    info(
        title = "Tollgate API",
        version = "0.1.0",
        description = "Username/password authentication issuing asymmetric-key signed access and refresh tokens.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "refresh_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(
                    DEFAULT_REFRESH_COOKIE_NAME,
                ))),
            );
        }
    }
}
