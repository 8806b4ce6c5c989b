//! tracing subscriber setup for the command line tool
//!
//! `MRVC_LOG` takes an `EnvFilter` directive string and wins over the
//! verbosity flag. `MRVC_LOG_FORMAT=json` switches to JSON lines. everything
//! goes to stderr so stdout stays reserved for command output.

use std::io::IsTerminal;

use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{Error, Result};

pub const LOG_ENV: &str = "MRVC_LOG";
pub const LOG_FORMAT_ENV: &str = "MRVC_LOG_FORMAT";

/// log output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::Logging(format!(
                "invalid log format {:?} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// install the global subscriber
///
/// `verbosity` is the number of `-v` flags: 0 = warn, 1 = info, 2 = debug,
/// anything more = trace.
pub fn init_logging(verbosity: u8) -> Result<()> {
    let filter = build_env_filter(verbosity)?;
    let format = match std::env::var(LOG_FORMAT_ENV) {
        Ok(value) => LogFormat::parse(&value)?,
        Err(_) => LogFormat::default(),
    };

    let base = Registry::default().with(filter);

    let result = match format {
        LogFormat::Json => base
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}

fn build_env_filter(verbosity: u8) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives.trim())
            .map_err(|e| Error::Logging(format!("invalid {} directive: {}", LOG_ENV, e))),
        _ => Ok(EnvFilter::new(level_for(verbosity))),
    }
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON ").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("text").unwrap(), LogFormat::Text);
        assert!(matches!(LogFormat::parse("xml"), Err(Error::Logging(_))));
    }
}
