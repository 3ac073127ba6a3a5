use serde::Serialize;

/// Conditions for listing device types.
///
/// Unset conditions are left to the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct DeviceTypeQuery {
    /// Whether to include asset information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_asset: Option<bool>,
    /// Page number, starting from 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DeviceTypeQuery {
    /// Creates a [`DeviceTypeQuery`] without conditions.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes or excludes asset information.
    #[must_use]
    #[inline]
    pub const fn include_asset(mut self, include_asset: bool) -> Self {
        self.include_asset = Some(include_asset);
        self
    }

    /// Selects a page.
    #[must_use]
    #[inline]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the number of results per page.
    #[must_use]
    #[inline]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Conditions for listing devices.
///
/// Unset conditions are left to the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct DeviceQuery {
    /// Token of the device type the devices must belong to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    /// Whether to exclude devices with an active assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_assigned: Option<bool>,
    /// Whether to include the device type of each device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_device_type: Option<bool>,
    /// Whether to include the active assignment of each device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_assignment: Option<bool>,
    /// Latest creation date, as formatted by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Page number, starting from 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DeviceQuery {
    /// Creates a [`DeviceQuery`] without conditions.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the list to devices of the given device type.
    #[must_use]
    #[inline]
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    /// Excludes or includes devices with an active assignment.
    #[must_use]
    #[inline]
    pub fn exclude_assigned(mut self, exclude_assigned: bool) -> Self {
        self.exclude_assigned = Some(exclude_assigned);
        self
    }

    /// Includes or excludes the device type of each device.
    #[must_use]
    #[inline]
    pub fn include_device_type(mut self, include_device_type: bool) -> Self {
        self.include_device_type = Some(include_device_type);
        self
    }

    /// Includes or excludes the active assignment of each device.
    #[must_use]
    #[inline]
    pub fn include_assignment(mut self, include_assignment: bool) -> Self {
        self.include_assignment = Some(include_assignment);
        self
    }

    /// Restricts the list to devices created before the given date.
    #[must_use]
    #[inline]
    pub fn end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Selects a page.
    #[must_use]
    #[inline]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the number of results per page.
    #[must_use]
    #[inline]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

#[cfg(test)]
#[cfg(feature = "deserialize")]
mod tests {
    use serde_json::json;

    use crate::serialize;

    use super::{DeviceQuery, DeviceTypeQuery};

    #[test]
    fn empty_queries() {
        assert_eq!(serialize(DeviceTypeQuery::new()), json!({}));
        assert_eq!(serialize(DeviceQuery::new()), json!({}));
    }

    #[test]
    fn device_type_query() {
        assert_eq!(
            serialize(DeviceTypeQuery::new().include_asset(false).page_size(50)),
            json!({
                "includeAsset": false,
                "pageSize": 50,
            })
        );
    }

    #[test]
    fn device_query() {
        let query = DeviceQuery::new()
            .device_type("thermometer")
            .exclude_assigned(true)
            .include_device_type(true)
            .include_assignment(false)
            .end_date("2024-03-01T00:00:00.000Z")
            .page(2)
            .page_size(25);

        assert_eq!(
            serialize(query),
            json!({
                "deviceType": "thermometer",
                "excludeAssigned": true,
                "includeDeviceType": true,
                "includeAssignment": false,
                "endDate": "2024-03-01T00:00:00.000Z",
                "page": 2,
                "pageSize": 25,
            })
        );
    }
}
