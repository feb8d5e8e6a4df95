// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! The HTTP client collaborator

use crate::{
    prepare::{ShapedBody, ShapedHeaders},
    types::Method,
};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Everything needed to issue one HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// the HTTP verb
    pub method: Method,
    /// the final URL
    pub url: String,
    /// merged headers and auth
    pub headers: ShapedHeaders,
    /// the shaped body
    pub body: ShapedBody,
}

/// A response as read from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// The complete response body
    pub body: Bytes,
}

impl RawResponse {
    /// Returns `true` for 4xx and 5xx statuses.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// The body as text, invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A failure which produced no response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportFailure {
    /// the failure description
    pub message: String,
    /// an associated code, if the failure carries one
    pub code: Option<u16>,
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        TransportFailure {
            message: err.to_string(),
            code: err.status().map(|status| status.as_u16()),
        }
    }
}

/// Issues a [`PreparedRequest`].
///
/// Error statuses are not failures, they are returned as a [`RawResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and reads the whole response body.
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportFailure>;
}

/// The default [`Transport`] backed by [`reqwest`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default configured client.
    pub fn new() -> Result<Self, TransportFailure> {
        Ok(Self {
            client: Client::builder()
                .min_tls_version(reqwest::tls::Version::TLS_1_2)
                .build()?,
        })
    }

    /// Creates a transport from an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

fn form_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportFailure> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.as_str());

        for (name, value) in request.headers.wire_headers() {
            builder = builder.header(name, value);
        }
        if let Some(auth) = &request.headers.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        if !request.body.is_empty() {
            builder = match &request.body {
                ShapedBody::Json(body) => builder.json(body),
                ShapedBody::Form(body) => {
                    let fields = body
                        .iter()
                        .map(|(key, value)| (key.as_str(), form_value(value)))
                        .collect::<Vec<_>>();
                    builder.form(&fields)
                }
            };
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_statuses() {
        let response = |status| RawResponse {
            status,
            body: Bytes::new(),
        };
        assert!(!response(200).is_error());
        assert!(!response(302).is_error());
        assert!(response(400).is_error());
        assert!(response(503).is_error());
    }

    #[test]
    fn lossy_text() {
        let response = RawResponse {
            status: 200,
            body: Bytes::from_static(&[b'o', b'k', 0xff]),
        };
        assert_eq!(response.text(), "ok\u{fffd}");
    }

    #[test]
    fn form_values_are_flattened() {
        assert_eq!(form_value(&Value::String("a b".into())), "a b");
        assert_eq!(form_value(&Value::Bool(true)), "true");
        assert_eq!(form_value(&serde_json::json!(42)), "42");
        assert_eq!(form_value(&Value::Null), "");
    }
}
