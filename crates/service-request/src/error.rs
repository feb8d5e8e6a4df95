// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code used when a failure does not carry one of its own.
pub const DEFAULT_ERROR_CODE: u16 = 500;

/// Message used when a transport failure has no message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Request error";

/// Represents all possible errors that can occur while dispatching a request to a service.
#[derive(Error, Debug)]
pub enum RequestError {
    /// The requested service name is not part of the configuration.
    #[error("Service config not found")]
    ServiceNotFound(String),

    /// The verb is not one of the supported HTTP methods.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A caller supplied header could not be interpreted.
    #[error("Invalid header '{0}': {1}")]
    InvalidHeader(String, &'static str),

    /// The service answered with an error status, the body is kept verbatim.
    #[error("{body}")]
    Client {
        /// HTTP status code returned by the service.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The request could not be completed (connection, timeout, body read, ...).
    #[error("{message}")]
    Transport {
        /// Human readable description of the failure.
        message: String,
        /// An optional code associated with the failure.
        code: Option<u16>,
    },

    /// Wraps a configuration loading error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl RequestError {
    /// The numeric code reported in the [`ErrorPayload`].
    pub fn code(&self) -> u16 {
        match self {
            RequestError::ServiceNotFound(_) => 422,
            RequestError::UnsupportedMethod(_) => 405,
            RequestError::InvalidHeader(..) => 400,
            RequestError::Client { status, .. } => *status,
            RequestError::Transport { code, .. } => code.unwrap_or(0),
            RequestError::Config(_) => 0,
        }
    }
}

/// The uniform failure shape handed back to callers instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Description of the failure, the raw response body for client errors.
    pub message: String,
    /// HTTP status or failure code, never zero.
    pub error_code: u16,
}

impl ErrorPayload {
    /// Builds a payload, substituting [`DEFAULT_ERROR_CODE`] for a zero code
    /// and [`DEFAULT_ERROR_MESSAGE`] for an empty message.
    pub fn new(error_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            message: if message.is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            error_code: if error_code == 0 {
                DEFAULT_ERROR_CODE
            } else {
                error_code
            },
        }
    }
}

impl From<RequestError> for ErrorPayload {
    fn from(err: RequestError) -> Self {
        // client errors keep the body as is, even when it is empty
        if let RequestError::Client { status, body } = err {
            return ErrorPayload {
                message: body,
                error_code: if status == 0 { DEFAULT_ERROR_CODE } else { status },
            };
        }
        ErrorPayload::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keeps_code() {
        assert_eq!(
            ErrorPayload::new(400, "Request error"),
            ErrorPayload {
                message: "Request error".into(),
                error_code: 400
            }
        );
    }

    #[test]
    fn payload_defaults_zero_code() {
        assert_eq!(ErrorPayload::new(0, "Request error").error_code, 500);
    }

    #[test]
    fn payload_defaults_empty_message() {
        let payload: ErrorPayload = RequestError::Transport {
            message: String::new(),
            code: None,
        }
        .into();
        assert_eq!(payload, ErrorPayload::new(500, "Request error"));
    }

    #[test]
    fn service_not_found_payload() {
        let payload: ErrorPayload = RequestError::ServiceNotFound("back".into()).into();
        assert_eq!(payload.message, "Service config not found");
        assert_eq!(payload.error_code, 422);
    }

    #[test]
    fn client_error_keeps_raw_body() {
        let body = r#"{"message":"Request error","error_code":400}"#;
        let payload: ErrorPayload = RequestError::Client {
            status: 400,
            body: body.into(),
        }
        .into();
        assert_eq!(payload.message, body);
        assert_eq!(payload.error_code, 400);
    }

    #[test]
    fn payload_serializes_with_snake_case_fields() {
        let json = serde_json::to_value(ErrorPayload::new(422, "Service config not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "Service config not found", "error_code": 422})
        );
    }
}
