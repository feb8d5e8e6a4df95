// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Service Request Client
//!
//! Sends single HTTP requests to named upstream services and normalizes the
//! answer. A [`ServiceRegistry`] maps service names to a base URL and a JSON
//! mode flag, a [`Dispatcher`] builds the URL, headers and body for a call and
//! turns the response into an [`Outcome`].
//!
//! Example
//! ```rust,no_run
//! use service_request::{Dispatcher, HeaderBag, Outcome, ServiceRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ServiceRegistry::from_file("services.yaml")?;
//!     let dispatcher = Dispatcher::new(registry)?;
//!
//!     // fetch a page as base64
//!     let header = HeaderBag::new().stream(true);
//!     match dispatcher.send("marvel", "GET", "docs", header, Default::default()).await {
//!         Outcome::Base64(page) => println!("{page}"),
//!         Outcome::Error(e) => eprintln!("Error {}: {}", e.error_code, e.message),
//!         other => println!("{other:?}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]

mod client;
pub mod config;
mod error;
pub mod log;
pub mod prepare;
pub mod transport;
mod types;

// Re-export public items
pub use client::Dispatcher;
pub use config::{ServiceConfig, ServiceRegistry};
pub use error::{ErrorPayload, RequestError, DEFAULT_ERROR_CODE, DEFAULT_ERROR_MESSAGE};
pub use transport::{PreparedRequest, RawResponse, ReqwestTransport, Transport, TransportFailure};
pub use types::{BasicAuth, Body, HeaderBag, Method, Outcome, AUTH_KEY, STREAM_HEADER};
