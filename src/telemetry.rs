//! Tracing setup.
//!
//! - TREASURE_HUNT_LOG sets the filter (e.g. "debug" or "warn,store=debug").
//!   Defaults to "warn" so normal play keeps stderr quiet.
//! - TREASURE_HUNT_LOG_FORMAT=json switches to JSON lines.
//!
//! Logs always go to stderr; stdout belongs to the screens. Colour only
//! when stderr is a terminal.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("TREASURE_HUNT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    match std::env::var("TREASURE_HUNT_LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
