use std::io;

use tracing_subscriber::EnvFilter;

/// `title` followed by a line of dashes of the same width.
pub fn underline(title: &str) -> String {
    let mut s = String::from(title);
    s.push('\n');
    s.push_str(&"-".repeat(title.chars().count()));
    s
}

/// Diagnostics go to stderr, leaving stdout to the report.
/// `RUST_LOG` wins over the verbosity count.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
