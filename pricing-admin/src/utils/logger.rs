//! Logging Infrastructure
//!
//! stderr logging by default, daily rolling files when a log directory exists.

use std::path::Path;

/// Initialize the logger with optional file output
///
/// Falls back to stderr when `log_dir` does not exist. Calling this twice
/// keeps the first subscriber.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "pricing-admin");
            let _ = subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init();
            return;
        }
    }

    // CLI output goes to stdout, keep logs on stderr
    let _ = subscriber.with_writer(std::io::stderr).try_init();
}
