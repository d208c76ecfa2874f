//! Remote asset records as returned by the asset query service.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute meta items, in the order the service reported them.
pub type MetaMap = IndexMap<String, serde_json::Value>;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct AssetAttribute {
    pub name: String,
    /// Name of the attribute's value type, resolved through the value descriptor registry.
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl AssetAttribute {
    pub fn new(name: &str, value_type: &str) -> Self {
        Self {
            name: name.to_string(),
            value_type: value_type.to_string(),
            meta: None,
            value: None,
        }
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.meta
            .get_or_insert_with(MetaMap::new)
            .insert(key.to_string(), value.into());
        self
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    /// Keyed by attribute name; iteration order is the asset's natural attribute order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<String, AssetAttribute>>,
}

impl Asset {
    pub fn new(id: &str, name: &str, asset_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            asset_type: asset_type.to_string(),
            parent_id: None,
            path: None,
            attributes: None,
        }
    }

    pub fn with_attribute(mut self, attribute: AssetAttribute) -> Self {
        self.attributes
            .get_or_insert_with(IndexMap::new)
            .insert(attribute.name.clone(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AssetAttribute> {
        self.attributes.as_ref()?.get(name)
    }
}
