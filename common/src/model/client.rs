use serde::{Deserialize, Serialize};

/// A customer organisation that delivers files to the platform.
///
/// The selected client scopes every interface, mapping rule and connector
/// configuration shown in the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload for creating or updating a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
}

impl Default for ClientInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            description: None,
            status: "ACTIVE".to_string(),
        }
    }
}

/// Minimal reference to another entity as embedded by the backend
/// (`{"id": 3}` or `{"id": 3, "name": "ACME"}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(id: i64) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

impl From<&Client> for ClientInput {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            code: client.code.clone(),
            description: client.description.clone(),
            status: client.status.clone(),
        }
    }
}

impl From<&Client> for EntityRef {
    fn from(client: &Client) -> Self {
        EntityRef::named(client.id, client.name.clone())
    }
}
