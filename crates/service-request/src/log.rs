// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Logging related stuff

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_log::LogTracer;
use tracing_subscriber::Registry;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// A log level parser for clap, with "off", "error", "warn", "info", "debug", "trace" as valid values
#[derive(Clone)]
pub struct LogLevelParser;

impl clap::builder::TypedValueParser for LogLevelParser {
    type Value = LevelFilter;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        clap::builder::TypedValueParser::parse(self, cmd, arg, value.to_owned())
    }

    fn parse(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: std::ffi::OsString,
    ) -> Result<Self::Value, clap::Error> {
        use std::str::FromStr;
        let p = clap::builder::PossibleValuesParser::new([
            "off", "error", "warn", "info", "debug", "trace",
        ]);
        let v = p.parse(cmd, arg, value)?;

        LevelFilter::from_str(&v).map_err(|_| clap::Error::new(clap::error::ErrorKind::InvalidValue))
    }
}

/// The `RUST_LOG` style directive used when the environment sets none.
pub fn default_directive(crate_name: &str, log_level: &LevelFilter) -> String {
    match *log_level {
        LevelFilter::OFF => "off".to_string(),
        _ => format!("warn,{crate_name}={log_level},service_request={log_level}"),
    }
}

/// Setup standard logging and loglevel for the calling crate and the `service_request` crate.
///
/// Log records from crates using `log` (like `reqwest`) are forwarded to `tracing`.
pub fn setup_logging(crate_name: &str, log_level: &LevelFilter) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to set logger")?;
    let filter = EnvFilter::builder()
        .try_from_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(crate_name, log_level)));
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::builder::TypedValueParser;

    #[test]
    fn directive_for_level() {
        assert_eq!(
            default_directive("svcreq", &LevelFilter::DEBUG),
            "warn,svcreq=debug,service_request=debug"
        );
        assert_eq!(default_directive("svcreq", &LevelFilter::OFF), "off");
    }

    #[test]
    fn parse_level() {
        let cmd = clap::Command::new("test");
        let level = LogLevelParser
            .parse_ref(&cmd, None, std::ffi::OsStr::new("info"))
            .unwrap();
        assert_eq!(level, LevelFilter::INFO);
        assert!(LogLevelParser
            .parse_ref(&cmd, None, std::ffi::OsStr::new("loud"))
            .is_err());
    }
}
