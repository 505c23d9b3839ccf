/// Configures the global tracing subscriber.
///
/// Verbosity is controlled through `RUST_LOG` (e.g. `RUST_LOG=debug`,
/// or per module: `RUST_LOG=pharma_stock::order_service=debug`); the default
/// is `info`. Call once at startup.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
