use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const CRATE_TARGET: &str = "booking_datepicker";

/// Where log lines go. The interactive UI owns the screen, so it logs to a
/// file or nowhere.
#[derive(Debug, Clone, Copy)]
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

/// Initialize tracing based on CLI verbosity level.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` env var overrides the CLI flag if set.
pub fn init(verbosity: u8, sink: LogSink<'_>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match sink {
        LogSink::Stderr => builder.with_writer(io::stderr).init(),
        LogSink::File(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        LogSink::Discard => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("{CRATE_TARGET}={level}")
}
