use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Output goes to stderr so command output on
/// stdout stays clean.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
