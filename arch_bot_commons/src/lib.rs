//! This create houses common for me functions, because some things
//! are just boilerplate and aaAAAAAAAAA

use std::{future::Future, io::IsTerminal};

/// Load `.env`, initialize logging and run the `closure` to completion on a
/// single-threaded async runtime.
///
/// Variables from a `.env` file in the working directory are loaded first,
/// without overriding ones that are already set. Logging uses the filter in
/// environment variable `RUST_LOG`, or `default_log_filter` if it is unset.
/// This uses the crate [pretty_env_logger][] internally, see its
/// documentation for more details.
///
/// [pretty_env_logger]: https://docs.rs/pretty_env_logger
///
/// # Panics
///
/// Panics if the tokio runtime fails to build.
pub fn start_everything(default_log_filter: &str, closure: impl Future<Output = ()>) {
    // Not having a .env file is perfectly normal.
    let dotenv_result = dotenv::dotenv();

    init_logging(default_log_filter);

    if let Err(e) = dotenv_result {
        if !e.not_found() {
            log::warn!("Failed to load .env file: {e}");
        }
    }

    log::info!("hi");

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build the tokio runtime!")
        .block_on(closure);
}

fn init_logging(default_log_filter: &str) {
    let log_level = std::env::var_os("RUST_LOG")
        .and_then(|x| x.into_string().ok())
        .unwrap_or_else(|| default_log_filter.to_string());

    let running_as_systemd_service = std::env::var_os("JOURNAL_STREAM").is_some();

    let mut builder = if std::io::stderr().is_terminal() {
        pretty_env_logger::formatted_timed_builder()
    } else {
        // Plain lines for log collectors.
        let mut builder = pretty_env_logger::formatted_builder();
        builder.format(move |buf, record| {
            use std::io::Write;
            let line = format_plain_line(
                record.target(),
                record.level(),
                record.args(),
                !running_as_systemd_service,
            );
            writeln!(buf, "{line}")
        });
        builder
    };

    builder.parse_filters(&log_level);

    if builder.try_init().is_err() {
        log::error!("Tried to init logger twice!");
    }
}

/// Formats a log line as `timestamp - target - LEVEL - message`.
/// Journald stamps lines by itself, so the timestamp can be left out.
fn format_plain_line(
    target: &str,
    level: log::Level,
    message: &std::fmt::Arguments,
    with_timestamp: bool,
) -> String {
    if with_timestamp {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        format!("{now} - {target} - {level} - {message}")
    } else {
        format!("{target} - {level} - {message}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn plain_line_without_timestamp() {
        let line = format_plain_line(
            "homework_status_bot::poller",
            log::Level::Debug,
            &format_args!("No change in homework status."),
            false,
        );
        assert_eq!(
            line,
            "homework_status_bot::poller - DEBUG - No change in homework status."
        );
    }

    #[test]
    fn plain_line_with_timestamp() {
        let line = format_plain_line("bot", log::Level::Error, &format_args!("oops"), true);
        assert!(line.ends_with(" - bot - ERROR - oops"), "{line}");
        // "YYYY-MM-DD HH:MM:SS,mmm"
        let (timestamp, _) = line.split_once(" - ").unwrap();
        assert_eq!(timestamp.len(), 23);
    }
}
