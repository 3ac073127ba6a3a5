use sitewhere::device_type::{DeviceType, DeviceTypeCreateRequest, DeviceTypeList};
use sitewhere::query::DeviceTypeQuery;

use crate::client::Client;
use crate::error::Result;
use crate::request::{Operation, RequestSender};

impl Client {
    /// Retrieves the [`DeviceType`] identified by `token`.
    ///
    /// # Errors
    ///
    /// An error is returned when the request cannot be authorized or sent,
    /// when the service answers with a status other than `200`, or when the
    /// response body is not a valid [`DeviceType`].
    pub fn device_type(&self, token: &str) -> Result<DeviceType> {
        RequestSender::new(self, Operation::GetDeviceType, Some(token))?.send()
    }

    /// Lists the device types matching the given [`DeviceTypeQuery`].
    ///
    /// Only the conditions set in the query are sent to the service.
    ///
    /// # Errors
    ///
    /// Same as [`Client::device_type`], with the addition of query
    /// serialization failures.
    pub fn device_types(&self, query: &DeviceTypeQuery) -> Result<DeviceTypeList> {
        RequestSender::new(self, Operation::ListDeviceTypes, None)?
            .query(query)?
            .send()
    }

    /// Creates a device type and returns it as registered by the service.
    ///
    /// # Errors
    ///
    /// Same as [`Client::device_type`], with the addition of body
    /// serialization failures.
    pub fn create_device_type(&self, request: &DeviceTypeCreateRequest) -> Result<DeviceType> {
        RequestSender::new(self, Operation::CreateDeviceType, None)?
            .body(request)?
            .send()
    }

    /// Updates the device type identified by `token` and returns its new
    /// state.
    ///
    /// # Errors
    ///
    /// Same as [`Client::create_device_type`].
    pub fn update_device_type(
        &self,
        token: &str,
        request: &DeviceTypeCreateRequest,
    ) -> Result<DeviceType> {
        RequestSender::new(self, Operation::UpdateDeviceType, Some(token))?
            .body(request)?
            .send()
    }

    /// Deletes the device type identified by `token` and returns its last
    /// state.
    ///
    /// # Errors
    ///
    /// Same as [`Client::device_type`].
    pub fn delete_device_type(&self, token: &str) -> Result<DeviceType> {
        RequestSender::new(self, Operation::DeleteDeviceType, Some(token))?.send()
    }
}
