use std::io;

/// Log events go to stderr so they never mix with command output on stdout.
pub fn setup_for_cli(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .without_time()
        .compact()
        .init();
}
