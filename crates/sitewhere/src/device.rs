use serde::Serialize;

use crate::Metadata;
use crate::response::SearchResults;

/// A mapping between a slot of a composite device and the device that
/// occupies it.
pub type ElementMapping = Metadata;

/// A list of [`Device`]s returned by the service.
pub type DeviceList = SearchResults<Device>;

/// A device registered on a SiteWhere instance.
///
/// Every field falls back to its default value when missing from the
/// response body or set to `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    /// Identifier assigned by the service.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub id: String,
    /// Display comment.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub comments: String,
    /// Creation timestamp, as formatted by the service.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub created_date: String,
    /// Element mappings of a composite device.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub device_element_mappings: Vec<ElementMapping>,
    /// Identifier of the device type owning this device.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub device_type_id: String,
    /// Identifier of the active assignment, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_assignment_id: Option<String>,
    /// Device metadata.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub metadata: Metadata,
    /// Unique token chosen by the caller at creation time.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub token: String,
}

/// A request to create or update a [`Device`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreateRequest {
    /// Unique device token.
    pub token: String,
    /// Token of the device type the device belongs to.
    pub device_type_token: String,
    /// Display comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Device metadata.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl DeviceCreateRequest {
    /// Creates a [`DeviceCreateRequest`] for a device identified by `token`
    /// and belonging to the device type identified by `device_type_token`.
    #[must_use]
    #[inline]
    pub fn new(token: impl Into<String>, device_type_token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            device_type_token: device_type_token.into(),
            comments: None,
            metadata: Metadata::new(),
        }
    }

    /// Sets the display comment.
    #[must_use]
    #[inline]
    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Adds a metadata entry, replacing the value of an existing key.
    #[must_use]
    #[inline]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
#[cfg(feature = "deserialize")]
mod tests {
    use serde_json::json;

    use crate::{deserialize, serialize};

    use super::{Device, DeviceCreateRequest, DeviceList, Metadata};

    #[test]
    fn partial_device() {
        assert_eq!(
            deserialize::<Device>(json!({
                "id": "1",
                "token": "dev-001",
                "comments": "test",
            })),
            Device {
                id: "1".into(),
                comments: "test".into(),
                token: "dev-001".into(),
                ..Device::default()
            }
        );
    }

    #[test]
    fn complete_device() {
        let device = deserialize::<Device>(json!({
            "id": "42",
            "comments": "Kitchen thermometer",
            "createdDate": "2024-03-01T10:00:00.000Z",
            "deviceElementMappings": [
                { "deviceElementSchemaPath": "/probe", "deviceToken": "probe-1" }
            ],
            "deviceTypeId": "type-7",
            "deviceAssignmentId": "assignment-3",
            "metadata": { "floor": "1", "room": "kitchen" },
            "token": "thermo-1",
        }));

        let mut mapping = Metadata::new();
        let _ = mapping.insert("deviceElementSchemaPath".into(), "/probe".into());
        let _ = mapping.insert("deviceToken".into(), "probe-1".into());

        let mut metadata = Metadata::new();
        let _ = metadata.insert("floor".into(), "1".into());
        let _ = metadata.insert("room".into(), "kitchen".into());

        assert_eq!(
            device,
            Device {
                id: "42".into(),
                comments: "Kitchen thermometer".into(),
                created_date: "2024-03-01T10:00:00.000Z".into(),
                device_element_mappings: vec![mapping],
                device_type_id: "type-7".into(),
                device_assignment_id: Some("assignment-3".into()),
                metadata,
                token: "thermo-1".into(),
            }
        );
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        assert_eq!(
            deserialize::<Device>(json!({
                "id": "1",
                "token": "dev-001",
                "comments": null,
                "createdDate": null,
                "deviceElementMappings": null,
                "deviceTypeId": null,
                "deviceAssignmentId": null,
                "metadata": null,
            })),
            Device {
                id: "1".into(),
                token: "dev-001".into(),
                ..Device::default()
            }
        );
    }

    #[test]
    fn unassigned_device_omits_assignment() {
        let value = serialize(Device {
            token: "dev-002".into(),
            ..Device::default()
        });

        assert!(value.get("deviceAssignmentId").is_none());
        assert_eq!(value["token"], "dev-002");
    }

    #[test]
    fn minimal_create_request() {
        assert_eq!(
            serialize(DeviceCreateRequest::new("dev-001", "thermometer")),
            json!({
                "token": "dev-001",
                "deviceTypeToken": "thermometer",
            })
        );
    }

    #[test]
    fn complete_create_request() {
        let request = DeviceCreateRequest::new("dev-001", "thermometer")
            .comments("Garage")
            .metadata("zone", "north")
            .metadata("zone", "south")
            .metadata("vendor", "acme");

        assert_eq!(
            serialize(request),
            json!({
                "token": "dev-001",
                "deviceTypeToken": "thermometer",
                "comments": "Garage",
                "metadata": { "zone": "south", "vendor": "acme" },
            })
        );
    }

    #[test]
    fn device_list() {
        let list = deserialize::<DeviceList>(json!({
            "numResults": 2,
            "results": [
                { "id": "1", "token": "a" },
                { "id": "2", "token": "b" },
            ],
        }));

        assert_eq!(list.num_results, 2);
        assert_eq!(
            list.iter().map(|device| device.token.as_str()).collect::<Vec<_>>(),
            ["a", "b"]
        );
    }
}
