// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Pure helpers shaping the URL, headers and body of a request

use crate::types::{insert_entry, BasicAuth, Body, HeaderBag, STREAM_HEADER};

/// Headers as handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapedHeaders {
    /// Basic auth credentials moved out of the caller's headers.
    pub auth: Option<BasicAuth>,
    /// The merged header entries, still including the stream pseudo-header.
    pub headers: Vec<(String, String)>,
}

impl ShapedHeaders {
    /// Looks up a header value, ASCII case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the stream pseudo-header is present and truthy.
    ///
    /// Empty values, `0` and `false` (any case) count as falsy.
    pub fn is_stream(&self) -> bool {
        self.get(STREAM_HEADER).is_some_and(|value| {
            let value = value.trim();
            !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
        })
    }

    /// The header entries which go on the wire.
    pub fn wire_headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(STREAM_HEADER))
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// A body as handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapedBody {
    /// Serialized as a JSON object.
    Json(Body),
    /// Sent as form fields.
    Form(Body),
}

impl ShapedBody {
    /// Returns `true` if there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            ShapedBody::Json(body) | ShapedBody::Form(body) => body.is_empty(),
        }
    }
}

/// Joins a service base URL and a request path.
///
/// A `scheme//` prefix is kept verbatim if the base contains `http`. Every `/`
/// is removed from the remaining host part, and host and path are joined by
/// exactly one `/`. No encoding or validation is done.
///
/// ```
/// use service_request::prepare::build_url;
///
/// assert_eq!(build_url("localhost/", "/auth"), "localhost/auth");
/// assert_eq!(build_url("http://localhost/", "auth"), "http://localhost/auth");
/// ```
pub fn build_url(base_url: &str, uri: &str) -> String {
    let (scheme, host) = match base_url.split_once("//") {
        Some((scheme, rest)) if base_url.contains("http") => (&base_url[..scheme.len() + 2], rest),
        _ => ("", base_url),
    };
    let host = host.replace('/', "");
    let path = uri.trim_start_matches('/');

    format!("{scheme}{host}/{path}")
}

/// Merges the caller's headers over the defaults of the service.
///
/// JSON mode services start from `Content-Type` and `Accept` set to
/// `application/json`, a caller header of the same name wins.
pub fn shape_headers(header: HeaderBag, json_mode: bool) -> ShapedHeaders {
    let mut headers = Vec::with_capacity(header.entries.len() + 2);
    if json_mode {
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        headers.push(("Accept".to_string(), "application/json".to_string()));
    }
    for (name, value) in header.entries {
        insert_entry(&mut headers, name, value);
    }

    ShapedHeaders {
        auth: header.auth,
        headers,
    }
}

/// Wraps the body for the transport according to the JSON mode.
pub fn shape_body(body: Body, json_mode: bool) -> ShapedBody {
    if json_mode {
        ShapedBody::Json(body)
    } else {
        ShapedBody::Form(body)
    }
}
