// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Send a single request to a configured service and print the result

#![deny(missing_docs)]
#![deny(clippy::all)]

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use service_request::{
    log::{setup_logging, LogLevelParser},
    Body, Dispatcher, HeaderBag, Outcome, ServiceRegistry,
};
use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{debug, level_filters::LevelFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// service configuration file (yaml, json or toml) with a `services` table
    #[arg(long, short, env = "SVCREQ_CONFIG", default_value = "services.yaml")]
    config: PathBuf,
    /// prefix of environment variables overriding the configuration
    #[arg(long, default_value = "SVCREQ")]
    env_prefix: String,
    /// header to send, as `name:value`
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    headers: Vec<(String, String)>,
    /// basic auth credentials, as `username:password`
    #[arg(long)]
    auth: Option<String>,
    /// fetch the raw body and print it base64 encoded
    #[arg(long)]
    stream: bool,
    /// request body, a JSON object
    #[arg(long, short)]
    data: Option<String>,
    /// Log level for the log output.
    /// Valid values are: `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[arg(long, default_value_t = LevelFilter::WARN, value_parser = LogLevelParser)]
    log_level: LevelFilter,
    /// name of the service
    service: String,
    /// HTTP method
    method: String,
    /// path relative to the service URL
    uri: String,
}

fn parse_header(s: &str) -> Result<(String, String)> {
    let Some((name, value)) = s.split_once(':') else {
        bail!("expected `name:value`, got `{s}`");
    };
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn header_bag(args: &Arguments) -> HeaderBag {
    let mut bag = args
        .headers
        .iter()
        .fold(HeaderBag::new(), |bag, (name, value)| bag.header(name, value));
    if let Some(auth) = &args.auth {
        let (username, password) = auth.split_once(':').unwrap_or((auth.as_str(), ""));
        bag = bag.auth(username, password);
    }
    if args.stream {
        bag = bag.stream(true);
    }
    bag
}

fn request_body(data: Option<&str>) -> Result<Body> {
    let Some(data) = data else {
        return Ok(Body::new());
    };
    match serde_json::from_str::<Value>(data).context("Failed to parse request body")? {
        Value::Object(map) => Ok(map),
        other => bail!("request body must be a JSON object, got `{other}`"),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Arguments::parse();
    setup_logging(env!("CARGO_CRATE_NAME"), &args.log_level)?;

    let registry = ServiceRegistry::from_file_with_env(&args.config, &args.env_prefix)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let header = header_bag(&args);
    let body = request_body(args.data.as_deref())?;
    let dispatcher = Dispatcher::new(registry)?;
    debug!(
        services = ?dispatcher.services().names().collect::<Vec<_>>(),
        "Loaded services"
    );

    let outcome = dispatcher
        .send(&args.service, &args.method, &args.uri, header, body)
        .await;

    let failed = outcome.is_error();
    match outcome {
        Outcome::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Outcome::Raw(body) => io::stdout()
            .write_all(&body)
            .context("Failed to write response body")?,
        Outcome::Base64(text) => println!("{text}"),
        Outcome::Empty => {}
        Outcome::Error(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
