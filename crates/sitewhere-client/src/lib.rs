//! The `sitewhere-client` library crate provides a blocking client for the
//! device-management REST API of a SiteWhere instance.
//!
//! Core functionalities of this crate include:
//!
//! - Retrieving, listing, creating, updating, and deleting device types
//! - Retrieving, listing, creating, updating, and deleting devices
//! - Obtaining a bearer credential before each call, either from the JSON
//!   web token endpoint of the instance or from a custom authorizer
//! - Sending the tenant headers of a multitenant instance
//!
//! Every call is synchronous and returns either the decoded record or an
//! error describing the failed operation. A client holds no mutable state,
//! so it can be cloned and shared across threads.
//!
//! The exchanged records are defined in the `sitewhere` crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Bearer credential providers.
pub mod auth;
/// A client for a SiteWhere instance and its configuration.
pub mod client;
/// Error management.
pub mod error;
/// Operations and the construction of their requests.
pub mod request;

// Device operations.
mod device;
// Device type operations.
mod device_type;
// Response decoding.
mod response;
