//! The data interface between a SiteWhere instance and its clients.
//!
//! This crate provides the records exchanged with the SiteWhere
//! device-management REST API:
//!
//! - Devices and device types, as returned by the service.
//! - The create and update requests a client sends to register or modify
//!   devices and device types. Server-assigned fields, such as identifiers
//!   and timestamps, are not part of a request.
//! - Query conditions for listing devices and device types. Each set field
//!   becomes a URL query parameter, while unset fields are left out.
//! - The list envelope wrapping every collection and the error envelope
//!   returned on failed requests.
//!
//! Every record is serializable. Clients need to deserialize the records
//! returned by the service, so deserialization is enabled by the
//! `deserialize` feature, which is part of the default features.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use indexmap::IndexMap;

/// Devices and the requests to create or update them.
pub mod device;
/// Device types and the requests to create or update them.
pub mod device_type;
/// Query conditions for listing devices and device types.
pub mod query;
/// List and error envelopes returned by the service.
pub mod response;

/// Free-form metadata attached to a device or a device type.
///
/// Entries keep their insertion order.
pub type Metadata = IndexMap<String, String>;

// Reads an explicit `null` as the default value of the field.
#[cfg(feature = "deserialize")]
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    <Option<T> as serde::Deserialize<'de>>::deserialize(deserializer)
        .map(Option::unwrap_or_default)
}

#[cfg(test)]
#[cfg(feature = "deserialize")]
pub(crate) fn serialize<T: serde::Serialize>(value: T) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

#[cfg(test)]
#[cfg(feature = "deserialize")]
pub(crate) fn deserialize<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}
