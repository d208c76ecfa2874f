//! Attribute descriptors and the display labels derived from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
}

impl AttributeDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            units: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_units(mut self, units: &str) -> Self {
        self.units = Some(units.to_string());
        self
    }
}

/// Descriptors keyed by asset type and attribute name. Descriptors registered
/// without an asset type apply to every asset type that has no specific one.
#[derive(Clone, Debug, Default)]
pub struct AttributeDescriptorRegistry {
    by_asset_type: HashMap<(String, String), AttributeDescriptor>,
    generic: HashMap<String, AttributeDescriptor>,
}

impl AttributeDescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, asset_type: Option<&str>, descriptor: AttributeDescriptor) {
        match asset_type {
            Some(asset_type) => {
                self.by_asset_type
                    .insert((asset_type.to_string(), descriptor.name.clone()), descriptor);
            }
            None => {
                self.generic.insert(descriptor.name.clone(), descriptor);
            }
        }
    }

    pub fn descriptor(&self, attribute_name: &str, asset_type: &str) -> Option<&AttributeDescriptor> {
        self.by_asset_type
            .get(&(asset_type.to_string(), attribute_name.to_string()))
            .or_else(|| self.generic.get(attribute_name))
    }

    /// Display label for an attribute: the descriptor's label (with units in
    /// parentheses when known), else the humanized attribute name.
    pub fn label(&self, attribute_name: &str, asset_type: &str) -> String {
        let descriptor = self.descriptor(attribute_name, asset_type);
        let base = descriptor
            .and_then(|d| d.label.clone())
            .unwrap_or_else(|| humanize(attribute_name));
        match descriptor.and_then(|d| d.units.as_deref()) {
            Some(units) => format!("{} ({})", base, units),
            None => base,
        }
    }
}

/// `"targetTemperature"` / `"target_temperature"` → `"Target temperature"`.
pub fn humanize(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let is_acronym = word.len() > 1 && word.chars().all(|c| !c.is_lowercase());
        if is_acronym {
            out.push_str(word);
        } else if i == 0 {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        } else {
            out.push_str(&word.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_splits_camel_and_snake_case() {
        assert_eq!(humanize("targetTemperature"), "Target temperature");
        assert_eq!(humanize("target_temperature"), "Target temperature");
        assert_eq!(humanize("co2Level"), "Co2 level");
        assert_eq!(humanize("windowOpen"), "Window open");
        assert_eq!(humanize("ID"), "ID");
    }

    #[test]
    fn asset_specific_descriptor_wins_over_generic() {
        let mut registry = AttributeDescriptorRegistry::new();
        registry.register(None, AttributeDescriptor::new("temperature").with_label("Temperature"));
        registry.register(
            Some("RoomAsset"),
            AttributeDescriptor::new("temperature")
                .with_label("Room temperature")
                .with_units("°C"),
        );
        assert_eq!(registry.label("temperature", "RoomAsset"), "Room temperature (°C)");
        assert_eq!(registry.label("temperature", "WeatherAsset"), "Temperature");
        assert_eq!(registry.label("humidityLevel", "RoomAsset"), "Humidity level");
    }
}
