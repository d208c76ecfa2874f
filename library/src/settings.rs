//! Tunables shared by the editor session and the egui widget.

use serde::{Deserialize, Serialize};

/// Meta item names consulted by the eligibility rule.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct MetaKeys {
    pub rule_state: String,
    pub agent_link: String,
}

impl Default for MetaKeys {
    fn default() -> Self {
        Self {
            rule_state: "ruleState".to_string(),
            agent_link: "agentLink".to_string(),
        }
    }
}

/// Display strings used by the picker. Every entry has an English default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PickerLabels {
    pub select_asset: String,
    pub assets_header: String,
    pub no_rule_state_attributes: String,
    pub unimplemented_picker: String,
    pub unimplemented: String,
    pub confirm_selection: String,
}

impl Default for PickerLabels {
    fn default() -> Self {
        Self {
            select_asset: "Select asset".to_string(),
            assets_header: "Assets".to_string(),
            no_rule_state_attributes: "No rule state attributes".to_string(),
            unimplemented_picker: "unimplemented picker".to_string(),
            unimplemented: "unimplemented".to_string(),
            confirm_selection: "Select".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PickerSettings {
    /// Subtracted from both observed container dimensions before they are
    /// written back as the node size.
    pub layout_padding: f32,
    pub meta_keys: MetaKeys,
    pub labels: PickerLabels,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            layout_padding: 20.0,
            meta_keys: MetaKeys::default(),
            labels: PickerLabels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_like_json_keeps_defaults() {
        let settings: PickerSettings =
            serde_json::from_str(r#"{ "labels": { "select_asset": "Asset wählen" } }"#).unwrap();
        assert_eq!(settings.labels.select_asset, "Asset wählen");
        assert_eq!(settings.labels.assets_header, "Assets");
        assert_eq!(settings.layout_padding, 20.0);
        assert_eq!(settings.meta_keys.rule_state, "ruleState");
    }
}
