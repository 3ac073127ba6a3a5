use serde::Serialize;

use crate::Metadata;
use crate::response::SearchResults;

/// A list of [`DeviceType`]s returned by the service.
pub type DeviceTypeList = SearchResults<DeviceType>;

/// How devices of a given type relate to other devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub enum ContainerPolicy {
    /// The device works on its own.
    #[default]
    Standalone,
    /// The device hosts other devices in its element slots.
    Composite,
}

impl std::fmt::Display for ContainerPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Standalone => "Standalone",
            Self::Composite => "Composite",
        })
    }
}

/// A device type registered on a SiteWhere instance.
///
/// Every field falls back to its default value when missing from the
/// response body or set to `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceType {
    /// Identifier assigned by the service.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub id: String,
    /// Device type name.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub name: String,
    /// Device type description.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub description: String,
    /// Icon shown by user interfaces.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub icon: String,
    /// Background color shown by user interfaces.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub background_color: String,
    /// Foreground color shown by user interfaces.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub foreground_color: String,
    /// Border color shown by user interfaces.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub border_color: String,
    /// Container policy.
    #[serde(alias = "containerPolice")]
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub container_policy: ContainerPolicy,
    /// Image reference.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub image_url: String,
    /// Device type metadata.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub metadata: Metadata,
    /// Unique token chosen by the caller at creation time.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub token: String,
    /// Creation timestamp, as formatted by the service.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub created_date: String,
    /// Last update timestamp, as formatted by the service.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub updated_date: String,
}

/// A request to create or update a [`DeviceType`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct DeviceTypeCreateRequest {
    /// Unique device type token.
    pub token: String,
    /// Device type name.
    pub name: String,
    /// Device type description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon shown by user interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Background color shown by user interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Foreground color shown by user interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    /// Border color shown by user interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Container policy.
    #[serde(default)]
    pub container_policy: ContainerPolicy,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Device type metadata.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl DeviceTypeCreateRequest {
    /// Creates a [`DeviceTypeCreateRequest`] for a standalone device type
    /// identified by `token`.
    #[must_use]
    #[inline]
    pub fn new(token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            name: name.into(),
            description: None,
            icon: None,
            background_color: None,
            foreground_color: None,
            border_color: None,
            container_policy: ContainerPolicy::Standalone,
            image_url: None,
            metadata: Metadata::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    #[inline]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the icon.
    #[must_use]
    #[inline]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the background, foreground and border colors at once.
    #[must_use]
    #[inline]
    pub fn colors(
        mut self,
        background: impl Into<String>,
        foreground: impl Into<String>,
        border: impl Into<String>,
    ) -> Self {
        self.background_color = Some(background.into());
        self.foreground_color = Some(foreground.into());
        self.border_color = Some(border.into());
        self
    }

    /// Sets the [`ContainerPolicy`].
    #[must_use]
    #[inline]
    pub fn container_policy(mut self, container_policy: ContainerPolicy) -> Self {
        self.container_policy = container_policy;
        self
    }

    /// Sets the image reference.
    #[must_use]
    #[inline]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
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

    use super::{ContainerPolicy, DeviceType, DeviceTypeCreateRequest, Metadata};

    #[test]
    fn complete_device_type() {
        let mut metadata = Metadata::new();
        let _ = metadata.insert("vendor".into(), "acme".into());

        assert_eq!(
            deserialize::<DeviceType>(json!({
                "id": "7",
                "name": "Thermometer",
                "description": "Temperature probe",
                "icon": "fa-thermometer",
                "backgroundColor": "#ffffff",
                "foregroundColor": "#000000",
                "borderColor": "#cccccc",
                "containerPolicy": "Composite",
                "imageUrl": "https://example.com/thermometer.png",
                "metadata": { "vendor": "acme" },
                "token": "thermometer",
                "createdDate": "2024-03-01T10:00:00.000Z",
                "updatedDate": "2024-03-02T10:00:00.000Z",
            })),
            DeviceType {
                id: "7".into(),
                name: "Thermometer".into(),
                description: "Temperature probe".into(),
                icon: "fa-thermometer".into(),
                background_color: "#ffffff".into(),
                foreground_color: "#000000".into(),
                border_color: "#cccccc".into(),
                container_policy: ContainerPolicy::Composite,
                image_url: "https://example.com/thermometer.png".into(),
                metadata,
                token: "thermometer".into(),
                created_date: "2024-03-01T10:00:00.000Z".into(),
                updated_date: "2024-03-02T10:00:00.000Z".into(),
            }
        );
    }

    #[test]
    fn legacy_container_policy_key() {
        let device_type = deserialize::<DeviceType>(json!({
            "token": "gateway",
            "containerPolice": "Composite",
        }));

        assert_eq!(device_type.container_policy, ContainerPolicy::Composite);
        assert_eq!(device_type.token, "gateway");
        assert!(device_type.name.is_empty());
    }

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let device_type = deserialize::<DeviceType>(json!({
            "id": "7",
            "token": "thermometer",
            "description": null,
            "icon": null,
            "containerPolicy": null,
            "imageUrl": null,
            "metadata": null,
        }));

        assert_eq!(
            device_type,
            DeviceType {
                id: "7".into(),
                token: "thermometer".into(),
                ..DeviceType::default()
            }
        );
        assert_eq!(device_type.container_policy, ContainerPolicy::Standalone);
    }

    #[test]
    fn minimal_create_request() {
        assert_eq!(
            serialize(DeviceTypeCreateRequest::new("thermometer", "Thermometer")),
            json!({
                "token": "thermometer",
                "name": "Thermometer",
                "containerPolicy": "Standalone",
            })
        );
    }

    #[test]
    fn complete_create_request() {
        let request = DeviceTypeCreateRequest::new("gateway", "Gateway")
            .description("Field gateway")
            .icon("fa-server")
            .colors("#ffffff", "#000000", "#cccccc")
            .container_policy(ContainerPolicy::Composite)
            .image_url("https://example.com/gateway.png")
            .metadata("vendor", "acme");

        assert_eq!(
            serialize(request),
            json!({
                "token": "gateway",
                "name": "Gateway",
                "description": "Field gateway",
                "icon": "fa-server",
                "backgroundColor": "#ffffff",
                "foregroundColor": "#000000",
                "borderColor": "#cccccc",
                "containerPolicy": "Composite",
                "imageUrl": "https://example.com/gateway.png",
                "metadata": { "vendor": "acme" },
            })
        );
    }

    #[test]
    fn container_policy_display() {
        assert_eq!(ContainerPolicy::Standalone.to_string(), "Standalone");
        assert_eq!(ContainerPolicy::Composite.to_string(), "Composite");
    }
}
