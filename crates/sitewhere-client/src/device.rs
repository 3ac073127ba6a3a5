use sitewhere::device::{Device, DeviceCreateRequest, DeviceList};
use sitewhere::query::DeviceQuery;

use crate::client::Client;
use crate::error::Result;
use crate::request::{Operation, RequestSender};

impl Client {
    /// Retrieves the [`Device`] identified by `token`.
    ///
    /// # Errors
    ///
    /// An error is returned when the request cannot be authorized or sent,
    /// when the service answers with a status other than `200`, or when the
    /// response body is not a valid [`Device`].
    pub fn device(&self, token: &str) -> Result<Device> {
        RequestSender::new(self, Operation::GetDevice, Some(token))?.send()
    }

    /// Lists the devices matching the given [`DeviceQuery`].
    ///
    /// # Errors
    ///
    /// Same as [`Client::device`], with the addition of query serialization
    /// failures.
    pub fn devices(&self, query: &DeviceQuery) -> Result<DeviceList> {
        RequestSender::new(self, Operation::ListDevices, None)?
            .query(query)?
            .send()
    }

    /// Creates a device.
    ///
    /// # Errors
    ///
    /// Same as [`Client::device`], with the addition of body serialization
    /// failures.
    pub fn create_device(&self, request: &DeviceCreateRequest) -> Result<Device> {
        RequestSender::new(self, Operation::CreateDevice, None)?
            .body(request)?
            .send()
    }

    /// Updates the device identified by `token`.
    ///
    /// # Errors
    ///
    /// Same as [`Client::create_device`].
    pub fn update_device(&self, token: &str, request: &DeviceCreateRequest) -> Result<Device> {
        RequestSender::new(self, Operation::UpdateDevice, Some(token))?
            .body(request)?
            .send()
    }

    /// Deletes the device identified by `token` and returns its last state.
    ///
    /// # Errors
    ///
    /// Same as [`Client::device`].
    pub fn delete_device(&self, token: &str) -> Result<Device> {
        RequestSender::new(self, Operation::DeleteDevice, Some(token))?.send()
    }
}
