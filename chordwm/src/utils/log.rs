use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered through `RUST_LOG`. Defaults to `info`.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
