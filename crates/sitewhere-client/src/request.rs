use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use tracing::debug;

use url::Url;

use crate::client::Client;
use crate::error::{Error, ErrorKind, Result};
use crate::response::parse_response;

// Path segments of the device types resource.
const DEVICE_TYPES: &[&str] = &["sitewhere", "api", "devicetypes"];
// Path segments of the devices resource.
const DEVICES: &[&str] = &["sitewhere", "api", "devices"];
// Path segments of the endpoint issuing JSON web tokens.
pub(crate) const JWT: &[&str] = &["sitewhere", "authapi", "jwt"];

/// All operations performed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Retrieve a bearer credential.
    Authorize,
    /// Retrieve a device type.
    GetDeviceType,
    /// List device types.
    ListDeviceTypes,
    /// Create a device type.
    CreateDeviceType,
    /// Update a device type.
    UpdateDeviceType,
    /// Delete a device type.
    DeleteDeviceType,
    /// Retrieve a device.
    GetDevice,
    /// List devices.
    ListDevices,
    /// Create a device.
    CreateDevice,
    /// Update a device.
    UpdateDevice,
    /// Delete a device.
    DeleteDevice,
}

impl Operation {
    /// Returns the HTTP method of the operation.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Authorize
            | Self::GetDeviceType
            | Self::ListDeviceTypes
            | Self::GetDevice
            | Self::ListDevices => Method::GET,
            Self::CreateDeviceType | Self::CreateDevice => Method::POST,
            Self::UpdateDeviceType | Self::UpdateDevice => Method::PUT,
            Self::DeleteDeviceType | Self::DeleteDevice => Method::DELETE,
        }
    }

    const fn segments(self) -> &'static [&'static str] {
        match self {
            Self::Authorize => JWT,
            Self::GetDeviceType
            | Self::ListDeviceTypes
            | Self::CreateDeviceType
            | Self::UpdateDeviceType
            | Self::DeleteDeviceType => DEVICE_TYPES,
            Self::GetDevice
            | Self::ListDevices
            | Self::CreateDevice
            | Self::UpdateDevice
            | Self::DeleteDevice => DEVICES,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Authorize => "authorize",
            Self::GetDeviceType => "get_device_type",
            Self::ListDeviceTypes => "list_device_types",
            Self::CreateDeviceType => "create_device_type",
            Self::UpdateDeviceType => "update_device_type",
            Self::DeleteDeviceType => "delete_device_type",
            Self::GetDevice => "get_device",
            Self::ListDevices => "list_devices",
            Self::CreateDevice => "create_device",
            Self::UpdateDevice => "update_device",
            Self::DeleteDevice => "delete_device",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Joins the base URL with the given path segments and an optional token.
///
/// Each segment is percent-encoded exactly once, so a token containing
/// reserved characters, such as `/` or `%`, is kept as a single segment.
pub(crate) fn join_url(base_url: &Url, segments: &[&str], token: Option<&str>) -> Result<Url> {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    {
        let mut path = url.path_segments_mut().map_err(|()| {
            Error::new(
                ErrorKind::Url,
                format!("`{base_url}` cannot be used as a base URL"),
            )
        })?;
        let _ = path.pop_if_empty().extend(segments).extend(token);
    }

    Ok(url)
}

// Converts query conditions into query pairs.
//
// Unset conditions are serialized as `null` and skipped. Pairs keep the
// declaration order of the fields.
fn query_pairs<Q: Serialize>(query: &Q) -> Result<Vec<(String, String)>> {
    let Value::Object(fields) = serde_json::to_value(query).map_err(Error::encoding)? else {
        return Err(Error::new(
            ErrorKind::Encoding,
            "Query conditions must be a structure of named fields",
        ));
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        let value = match value {
            Value::Null => continue,
            Value::Bool(value) => value.to_string(),
            Value::Number(value) => value.to_string(),
            Value::String(value) => value,
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::new(
                    ErrorKind::Encoding,
                    format!("Query condition `{name}` is not a scalar value"),
                ));
            }
        };
        pairs.push((name, value));
    }

    Ok(pairs)
}

/// A request sender.
///
/// It drives a single call through its steps: it builds the target URL,
/// attaches query conditions and body, authorizes the call, sends it, and
/// finally decodes the response.
///
/// Every error it returns carries the [`Operation`] and, when already known,
/// the target URL.
#[derive(Debug)]
pub(crate) struct RequestSender<'client> {
    client: &'client Client,
    operation: Operation,
    url: Url,
    body: Option<Vec<u8>>,
}

impl<'client> RequestSender<'client> {
    pub(crate) fn new(
        client: &'client Client,
        operation: Operation,
        token: Option<&str>,
    ) -> Result<Self> {
        // An empty token would address the whole collection.
        if token.is_some_and(str::is_empty) {
            return Err(
                Error::new(ErrorKind::Url, "Empty resource token").context(operation, None)
            );
        }

        let url = join_url(client.base_url(), operation.segments(), token)
            .map_err(|e| e.context(operation, None))?;

        Ok(Self {
            client,
            operation,
            url,
            body: None,
        })
    }

    pub(crate) fn query<Q: Serialize>(mut self, query: &Q) -> Result<Self> {
        let pairs = query_pairs(query).map_err(|e| self.context(e))?;

        if !pairs.is_empty() {
            let _ = self.url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(self)
    }

    pub(crate) fn body<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let body = serde_json::to_vec(body).map_err(|e| self.context(Error::encoding(e)))?;
        self.body = Some(body);
        Ok(self)
    }

    pub(crate) fn send<T: DeserializeOwned>(mut self) -> Result<T> {
        let method = self.operation.method();
        debug!("Sending `{}` request: {method} {}", self.operation, self.url);

        // A new credential is requested for each call.
        let credential = self
            .client
            .bearer_credential()
            .map_err(|e| self.context(e))?;

        let mut request = self
            .client
            .http()
            .request(method, self.url.clone())
            .bearer_auth(credential);

        if let Some(body) = self.body.take() {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().map_err(|e| self.context(e.into()))?;

        parse_response(response).map_err(|e| self.context(e))
    }

    fn context(&self, error: Error) -> Error {
        error.context(self.operation, Some(&self.url))
    }
}
