#![cfg_attr(not(target_os = "windows"), forbid(unsafe_code))]

mod constants;
mod controller;
mod crosshair;
mod dialogs;
mod events;
mod gui;
mod hotkeys;
mod platform;
mod resources;
mod state;
mod tray;
mod types;

use anyhow::{Context, Result};
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use constants::logging;

/// Map a `LOG_LEVEL` value to a tracing level, defaulting to info
fn parse_level(value: Option<&str>) -> TraceLevel {
    match value.unwrap_or("info").trim().to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let log_level = parse_level(std::env::var(logging::LEVEL_VAR).ok().as_deref());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting crosshair overlay");
    gui::run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_known_values() {
        assert_eq!(parse_level(Some("trace")), TraceLevel::TRACE);
        assert_eq!(parse_level(Some("DEBUG")), TraceLevel::DEBUG);
        assert_eq!(parse_level(Some(" warn ")), TraceLevel::WARN);
        assert_eq!(parse_level(Some("error")), TraceLevel::ERROR);
    }

    #[test]
    fn test_parse_level_defaults_to_info() {
        assert_eq!(parse_level(None), TraceLevel::INFO);
        assert_eq!(parse_level(Some("verbose")), TraceLevel::INFO);
    }
}
