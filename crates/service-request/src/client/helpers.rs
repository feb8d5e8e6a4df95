// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Internal helper methods

use crate::{
    transport::RawResponse,
    types::{Method, Outcome},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use tracing::warn;

/// Turns a successful response into an [`Outcome`].
pub(super) fn interpret(
    method: Method,
    json_mode: bool,
    stream: bool,
    response: RawResponse,
) -> Outcome {
    if stream {
        return Outcome::Base64(STANDARD.encode(&response.body));
    }
    if method == Method::Delete {
        return Outcome::Empty;
    }
    if json_mode {
        return Outcome::Json(decode_json(&response.body));
    }
    Outcome::Raw(response.body)
}

/// Decodes a JSON body, falling back to `null`.
fn decode_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!("Response body is not valid JSON: {e}");
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde_json::json;

    fn response(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn stream_is_base64() {
        assert_eq!(
            interpret(Method::Get, false, true, response("result")),
            Outcome::Base64("cmVzdWx0".into())
        );
    }

    #[test]
    fn empty_body_in_json_mode_is_null() {
        assert_eq!(
            interpret(Method::Post, true, false, response("")),
            Outcome::Json(Value::Null)
        );
    }

    #[test]
    fn json_scalars_decode() {
        assert_eq!(
            interpret(Method::Put, true, false, response("[1,2]")),
            Outcome::Json(json!([1, 2]))
        );
    }

    #[test]
    fn raw_body_without_json_mode() {
        assert_eq!(
            interpret(Method::Get, false, false, response(r#"{"a":1}"#)),
            Outcome::Raw(Bytes::from_static(br#"{"a":1}"#))
        );
    }

    #[test]
    fn raw_body_keeps_invalid_utf8() {
        let payload = Bytes::from_static(&[0x89, b'P', b'N', b'G', 0xff]);
        let outcome = interpret(
            Method::Get,
            false,
            false,
            RawResponse {
                status: 200,
                body: payload.clone(),
            },
        );
        assert_eq!(outcome, Outcome::Raw(payload));
    }
}
