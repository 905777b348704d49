use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Correspondence between one XML schema path and one database column,
/// consumed by the transformation engine on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub client_id: i64,
    pub interface_id: i64,
    #[serde(default)]
    pub name: String,
    pub xml_path: String,
    /// Column name only; the table lives in `table_name`.
    pub database_field: String,
    #[serde(default)]
    pub xsd_element: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub is_attribute: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation_rule: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// One node of the XSD structure returned by the backend for an interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XsdElement {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub has_complex_type: bool,
    #[serde(default)]
    pub elements: Vec<XsdElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compositor: Option<Compositor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_occurs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_occurs: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl XsdElement {
    pub fn has_children(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Label shown under the element name in the tree.
    pub fn type_label(&self) -> &str {
        self.element_type.as_deref().unwrap_or("complex")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compositor {
    Sequence,
    Choice,
    All,
}

/// A database column the backend exposes as a mapping target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseField {
    /// `table.column`
    pub field: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
