use serde::{Deserialize, Serialize};

use crate::model::client::EntityRef;

/// A named XML contract under a client. Mapping rules and connector
/// configurations attach to an interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,
    pub root_element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub client: EntityRef,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<InterfaceConfiguration>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Interface {
    /// Location of the XSD backing this interface, preferring the explicit
    /// configuration over the legacy `schemaPath` column.
    pub fn xsd_path(&self) -> Option<&str> {
        self.configuration
            .as_ref()
            .and_then(|c| c.xsd_path.as_deref())
            .or(self.schema_path.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xsd_path: Option<String>,
}

/// Payload for creating or updating an interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceInput {
    pub name: String,
    #[serde(rename = "type")]
    pub interface_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub root_element: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub client: EntityRef,
    pub is_active: bool,
    pub priority: i32,
}

impl From<&Interface> for InterfaceInput {
    fn from(interface: &Interface) -> Self {
        Self {
            name: interface.name.clone(),
            interface_type: interface.interface_type.clone(),
            description: interface.description.clone(),
            root_element: interface.root_element.clone(),
            namespace: interface.namespace.clone(),
            client: EntityRef::new(interface.client.id),
            is_active: interface.is_active,
            priority: interface.priority,
        }
    }
}

impl InterfaceInput {
    pub fn for_client(client_id: i64) -> Self {
        Self {
            name: String::new(),
            interface_type: "XML".to_string(),
            description: None,
            root_element: String::new(),
            namespace: None,
            client: EntityRef::new(client_id),
            is_active: true,
            priority: 0,
        }
    }
}
