//! Tollgate Observability
//!
//! - Structured logging to console and rolling files
//! - Distributed tracing via OpenTelemetry (when `OTEL_EXPORTER_OTLP_ENDPOINT` is set)
//! - Prometheus metrics for HTTP traffic and token issuance
//! - HTTP request/response logging middleware
//!
//! Everything except basic console logging sits behind the `observability`
//! feature. At runtime `OBSERVABILITY_ENABLED=false` turns it off as well.
//!
//! # Examples
//!
//! ```no_run
//! use tollgate_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_tracing();
//!     // ... application code ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
mod request;

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_login_failure, track_login_success,
    track_logout, track_token_refresh, track_token_validation, track_tokens_issued,
    track_user_created,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    /// Request logging still happens without the feature; only the
    /// exporters go away.
    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        crate::request::log_request(req, next).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {
        crate::basic_logging::init_basic_console_logging();
    }

    pub async fn shutdown_tracer() {}

    /// Stand-in for the Prometheus handle; renders nothing.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn metrics_app<S: Clone + Send + Sync + 'static>(_handle: PrometheusHandle) -> Router<S> {
        Router::new()
    }

    pub fn track_tokens_issued(_kind: &str) {}
    pub fn track_token_validation(_reason: Option<&str>) {}
    pub fn track_token_refresh(_rotated: bool) {}
    pub fn track_login_success() {}
    pub fn track_login_failure(_reason: &str) {}
    pub fn track_logout() {}
    pub fn track_user_created() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
