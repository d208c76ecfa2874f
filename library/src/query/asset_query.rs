use std::sync::RwLock;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::model::Asset;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetSelect {
    #[serde(default)]
    pub exclude_parent_info: bool,
    #[serde(default)]
    pub exclude_path: bool,
    /// Restricts the returned attribute map to these names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssetQuery {
    pub ids: Vec<String>,
    pub select: AssetSelect,
}

impl AssetQuery {
    /// All attributes of one asset, without parent or path information.
    pub fn attributes_of(asset_id: &str) -> Self {
        Self {
            ids: vec![asset_id.to_string()],
            select: AssetSelect {
                exclude_parent_info: true,
                exclude_path: true,
                attributes: None,
            },
        }
    }

    /// A single attribute of one asset.
    pub fn single_attribute(asset_id: &str, attribute_name: &str) -> Self {
        let mut query = Self::attributes_of(asset_id);
        query.select.attributes = Some(vec![attribute_name.to_string()]);
        query
    }
}

/// Remote asset lookup. Implementations may block; callers run them off the UI thread.
pub trait AssetQueryService: Send + Sync {
    fn query_assets(&self, query: &AssetQuery) -> Result<Vec<Asset>, LibraryError>;
}

/// Asset store held in memory, answering queries the way the remote service does.
#[derive(Default)]
pub struct InMemoryAssetService {
    assets: RwLock<IndexMap<String, Asset>>,
}

impl InMemoryAssetService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(assets: impl IntoIterator<Item = Asset>) -> Self {
        let service = Self::new();
        for asset in assets {
            service.insert(asset);
        }
        service
    }

    pub fn insert(&self, asset: Asset) {
        match self.assets.write() {
            Ok(mut assets) => {
                assets.insert(asset.id.clone(), asset);
            }
            Err(e) => log::error!("Failed to insert asset: {}", e),
        }
    }

    pub fn remove(&self, asset_id: &str) -> Option<Asset> {
        self.assets.write().ok()?.shift_remove(asset_id)
    }

    /// `(id, name)` of every stored asset, in insertion order.
    pub fn summaries(&self) -> Vec<(String, String)> {
        self.assets
            .read()
            .map(|assets| {
                assets
                    .values()
                    .map(|a| (a.id.clone(), a.name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl AssetQueryService for InMemoryAssetService {
    fn query_assets(&self, query: &AssetQuery) -> Result<Vec<Asset>, LibraryError> {
        let assets = self.assets.read().map_err(|e| {
            LibraryError::Query(format!("Failed to acquire asset store lock: {}", e))
        })?;

        Ok(query
            .ids
            .iter()
            .filter_map(|id| assets.get(id))
            .map(|asset| {
                let mut asset = asset.clone();
                if query.select.exclude_parent_info {
                    asset.parent_id = None;
                }
                if query.select.exclude_path {
                    asset.path = None;
                }
                if let (Some(names), Some(attributes)) =
                    (&query.select.attributes, asset.attributes.as_mut())
                {
                    attributes.retain(|name, _| names.contains(name));
                }
                asset
            })
            .collect())
    }
}
