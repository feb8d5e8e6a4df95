// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

mod helpers;

use crate::{
    config::ServiceRegistry,
    error::RequestError,
    prepare::{build_url, shape_body, shape_headers},
    transport::{PreparedRequest, ReqwestTransport, Transport, TransportFailure},
    types::{Body, HeaderBag, Method, Outcome},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends requests to the named services of a [`ServiceRegistry`].
///
/// Every call is a single attempt. Failures never surface as `Err`, they
/// come back as [`Outcome::Error`].
///
/// # Examples
///
/// ```rust,no_run
/// use service_request::{Dispatcher, HeaderBag, Outcome, ServiceConfig, ServiceRegistry};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let registry: ServiceRegistry = [(
///         "todos".to_string(),
///         ServiceConfig::new("https://jsonplaceholder.typicode.com"),
///     )]
///     .into_iter()
///     .collect();
///     let dispatcher = Dispatcher::new(registry)?;
///
///     match dispatcher
///         .send("todos", "GET", "todos/1", HeaderBag::new(), Default::default())
///         .await
///     {
///         Outcome::Json(todo) => println!("{todo}"),
///         Outcome::Error(e) => eprintln!("{}: {}", e.error_code, e.message),
///         other => println!("{other:?}"),
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    services: ServiceRegistry,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Creates a dispatcher using a [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns a [`TransportFailure`] if the HTTP client cannot be built.
    pub fn new(services: ServiceRegistry) -> Result<Self, TransportFailure> {
        Ok(Self::with_transport(services, ReqwestTransport::new()?))
    }

    /// Creates a dispatcher issuing its requests through `transport`.
    pub fn with_transport(services: ServiceRegistry, transport: impl Transport + 'static) -> Self {
        Self {
            services,
            transport: Arc::new(transport),
        }
    }

    /// The configured services.
    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// Sends a request with a verb given by name.
    ///
    /// The service is looked up before the verb is validated, so an unknown
    /// service reports `Service config not found` (422) and an unknown verb
    /// `Unsupported HTTP method` (405). Neither reaches the transport.
    pub async fn send(
        &self,
        service: &str,
        method: &str,
        uri: &str,
        header: HeaderBag,
        body: Body,
    ) -> Outcome {
        if self.services.get(service).is_none() {
            return reject(RequestError::ServiceNotFound(service.to_string()));
        }
        match method.parse::<Method>() {
            Ok(method) => self.dispatch(service, method, uri, header, body).await,
            Err(err) => reject(err),
        }
    }

    /// Sends a request to `service` and interprets the response.
    ///
    /// In order of precedence, the result is:
    /// * [`Outcome::Base64`] of the body if the `stream` header is truthy
    /// * [`Outcome::Empty`] for `DELETE`
    /// * [`Outcome::Json`] for JSON mode services, `null` if the body is no JSON
    /// * [`Outcome::Raw`] with the untouched body otherwise
    ///
    /// Error statuses yield an [`Outcome::Error`] carrying the raw body and the status.
    pub async fn dispatch(
        &self,
        service: &str,
        method: Method,
        uri: &str,
        header: HeaderBag,
        body: Body,
    ) -> Outcome {
        let Some(config) = self.services.get(service) else {
            return reject(RequestError::ServiceNotFound(service.to_string()));
        };
        let json_mode = config.json_mode;

        let headers = shape_headers(header, json_mode);
        let body = shape_body(body, json_mode);
        let url = build_url(&config.base_url, uri);
        let stream = headers.is_stream();

        debug!(service, %method, %url, json_mode, stream, "Sending request");

        let request = PreparedRequest {
            method,
            url,
            headers,
            body,
        };
        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(TransportFailure { message, code }) => {
                return reject(RequestError::Transport { message, code });
            }
        };

        if response.is_error() {
            return reject(RequestError::Client {
                status: response.status,
                body: response.text(),
            });
        }

        debug!(service, status = response.status, "Received response");
        helpers::interpret(method, json_mode, stream, response)
    }
}

fn reject(err: RequestError) -> Outcome {
    warn!(code = err.code(), "Request failed: {err}");
    err.into()
}
