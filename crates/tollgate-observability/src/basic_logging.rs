use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!(
        "tollgate={level},tollgate_auth={level},tollgate_db={level},tollgate_cli={level},\
         tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn"
    )
}

/// Console-only logging.
///
/// Used when the `observability` feature is compiled out or disabled at
/// runtime, and by the CLI.
///
/// - **Log Level**: `LOG_LEVEL` (default "info"), overridden by `RUST_LOG`
/// - **Format**: compact with ANSI colors
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter);

    // A subscriber may already be installed (tests, embedding binaries)
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
