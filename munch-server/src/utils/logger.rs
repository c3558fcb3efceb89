//! Logging Infrastructure
//!
//! tracing-subscriber setup. Level comes from `RUST_LOG` (or the explicit
//! override), output goes to stdout, or to a daily-rolling file when a log
//! directory is configured.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `log_level` overrides `RUST_LOG`; both default to `info`.
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let file_appender = tracing_appender::rolling::daily(dir, "munch-server");
        subscriber.with_writer(file_appender).with_ansi(false).init();
        return;
    }

    subscriber.init();
}
