//! Value type descriptors and their mapping onto socket types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::NodeDataType;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValueDescriptor {
    pub name: String,
    /// JSON kind of the values: "number", "bigint", "string", "boolean", "object", ...
    pub json_type: String,
    #[serde(default)]
    pub array_dimensions: u32,
}

impl ValueDescriptor {
    pub fn new(name: &str, json_type: &str) -> Self {
        Self {
            name: name.to_string(),
            json_type: json_type.to_string(),
            array_dimensions: 0,
        }
    }

    pub fn array(mut self, dimensions: u32) -> Self {
        self.array_dimensions = dimensions;
        self
    }
}

/// Socket type a value of this descriptor flows through.
pub fn socket_type_for(descriptor: &ValueDescriptor) -> NodeDataType {
    if descriptor.array_dimensions > 0 {
        return NodeDataType::Any;
    }
    if descriptor.name == "colourRGB" {
        return NodeDataType::Color;
    }
    match descriptor.json_type.as_str() {
        "number" | "bigint" => NodeDataType::Number,
        "string" => NodeDataType::String,
        "boolean" => NodeDataType::Boolean,
        _ => NodeDataType::Any,
    }
}

/// Lookup of value descriptors by type name.
#[derive(Clone, Debug, Default)]
pub struct ValueDescriptorRegistry {
    descriptors: HashMap<String, ValueDescriptor>,
}

impl ValueDescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the common built-in value types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, json_type) in [
            ("text", "string"),
            ("email", "string"),
            ("timestamp", "number"),
            ("number", "number"),
            ("integer", "number"),
            ("positiveInteger", "number"),
            ("positiveNumber", "number"),
            ("bigNumber", "bigint"),
            ("boolean", "boolean"),
            ("colourRGB", "string"),
            ("JSONObject", "object"),
            ("GEO_JSONPoint", "object"),
        ] {
            registry.register(ValueDescriptor::new(name, json_type));
        }
        registry.register(ValueDescriptor::new("numberArray", "number").array(1));
        registry
    }

    pub fn register(&mut self, descriptor: ValueDescriptor) {
        self.descriptors.insert(descriptor.name.clone(), descriptor);
    }

    pub fn find(&self, name: &str) -> Option<&ValueDescriptor> {
        self.descriptors.get(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
