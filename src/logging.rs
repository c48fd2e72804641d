use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when RUST_LOG is unset
const DEFAULT_FILTER: &str = "cat_fetcher=info";

/// Install the global tracing subscriber. Call once, before anything logs.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
