// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

use crate::error::{ErrorPayload, RequestError};
use bytes::Bytes;
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

/// Name of the pseudo-header which requests a base64 encoded, streamed body.
pub const STREAM_HEADER: &str = "stream";

/// Name of the reserved header key holding basic auth credentials.
pub const AUTH_KEY: &str = "auth";

/// A request body, an arbitrary key-value mapping.
pub type Body = Map<String, Value>;

/// The HTTP verbs a request can be dispatched with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl Method {
    const ALL: [(&'static str, Method); 7] = [
        ("GET", Method::Get),
        ("POST", Method::Post),
        ("PUT", Method::Put),
        ("PATCH", Method::Patch),
        ("DELETE", Method::Delete),
        ("HEAD", Method::Head),
        ("OPTIONS", Method::Options),
    ];

    /// Returns the upper case verb as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RequestError;

    /// Verbs are matched ASCII case-insensitively against the supported set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, method)| *method)
            .ok_or_else(|| RequestError::UnsupportedMethod(s.to_string()))
    }
}

/// Basic auth credentials, passed through to the HTTP client untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// the user name
    pub username: String,
    /// the password
    pub password: String,
}

/// Caller supplied headers for a single request.
///
/// Besides ordinary header entries the bag can hold basic auth credentials
/// and the [`STREAM_HEADER`] pseudo-header. Entry names are unique,
/// compared ASCII case-insensitively; a later insert replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBag {
    pub(crate) entries: Vec<(String, String)>,
    pub(crate) auth: Option<BasicAuth>,
}

impl HeaderBag {
    /// An empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a header entry.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets the basic auth credentials.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Sets the [`STREAM_HEADER`] flag.
    pub fn stream(self, enabled: bool) -> Self {
        self.header(STREAM_HEADER, if enabled { "true" } else { "false" })
    }

    /// Adds or replaces a header entry in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        insert_entry(&mut self.entries, name.into(), value.into());
    }

    /// The header entries in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// The basic auth credentials, if any.
    pub fn credentials(&self) -> Option<&BasicAuth> {
        self.auth.as_ref()
    }

    /// Builds a bag from a loosely typed JSON object.
    ///
    /// The `auth` key must be an array of `[username, password]`, a missing
    /// password is taken as empty. Scalar values of other keys are converted
    /// to their textual form, `null` becomes an empty value.
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self, RequestError> {
        let mut bag = HeaderBag::new();
        for (name, value) in map {
            if name == AUTH_KEY {
                let Value::Array(pair) = value else {
                    return Err(RequestError::InvalidHeader(
                        name.clone(),
                        "expected [username, password]",
                    ));
                };
                let mut parts = pair.iter().map(scalar_to_string);
                let username = parts.next().ok_or_else(|| {
                    RequestError::InvalidHeader(name.clone(), "missing username")
                })?;
                bag = bag.auth(username, parts.next().unwrap_or_default());
                continue;
            }
            bag.insert(name.clone(), scalar_to_string(value));
        }
        Ok(bag)
    }
}

pub(crate) fn insert_entry(entries: &mut Vec<(String, String)>, name: String, value: String) {
    match entries
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
    {
        Some(entry) => *entry = (name, value),
        None => entries.push((name, value)),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The interpreted result of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The decoded JSON body of a JSON mode service.
    Json(Value),
    /// The untouched body of a non JSON mode service.
    Raw(Bytes),
    /// The base64 encoded body of a streamed request.
    Base64(String),
    /// Result of a successful `DELETE`, the body is ignored.
    Empty,
    /// Any failure, from configuration lookup to the HTTP exchange.
    Error(ErrorPayload),
}

impl Outcome {
    /// Returns `true` if this is an [`Outcome::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// The raw body as text, if this is an [`Outcome::Raw`] holding valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Outcome::Raw(body) => std::str::from_utf8(body).ok(),
            _ => None,
        }
    }

    /// Returns the error payload, if any.
    pub fn error(&self) -> Option<&ErrorPayload> {
        match self {
            Outcome::Error(payload) => Some(payload),
            _ => None,
        }
    }
}

impl From<RequestError> for Outcome {
    fn from(err: RequestError) -> Self {
        Outcome::Error(err.into())
    }
}
