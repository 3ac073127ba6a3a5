use std::borrow::Cow;

use sitewhere::response::ErrorResponse;

use reqwest::StatusCode;
use reqwest::blocking::Response;

use serde::de::DeserializeOwned;

use tracing::{debug, warn};

use crate::error::{Error, Result};

// Builds the error describing a response with a status other than `200`.
//
// When the body is not a valid error envelope, its raw content is kept as
// description, falling back to the canonical reason of the status.
fn api_error(status: StatusCode, body: &[u8]) -> Error {
    let reason = || {
        Cow::Borrowed(
            status
                .canonical_reason()
                .unwrap_or("Unknown status code"),
        )
    };

    let description = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(envelope) if !envelope.message.is_empty() => Cow::Owned(envelope.message),
        Ok(envelope) => envelope.error.map_or_else(reason, Cow::Owned),
        Err(e) => {
            debug!("Error response body is not an error envelope: {e}");
            let text = String::from_utf8_lossy(body).trim().to_owned();
            if text.is_empty() {
                reason()
            } else {
                Cow::Owned(text)
            }
        }
    };

    Error::api(status.as_u16(), description)
}

// Decodes a response body.
//
// Only a `200` status is considered a success.
pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    if status != StatusCode::OK {
        warn!("Received an error response with status {status}");
        return Err(api_error(status, body));
    }

    serde_json::from_slice(body).map_err(Error::decoding)
}

/// Reads a response and decodes its body.
pub(crate) fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes()?;
    decode_body(status, &body)
}
