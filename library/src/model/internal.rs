//! Parameter slots ("internals") carried by flow nodes.

use serde::{Deserialize, Serialize};

use super::value::InternalValue;

/// Which editor an internal is edited with.
///
/// Serialized as its upper-case tag. Tags this build does not know decode to
/// [`PickerType::Unknown`] so newer documents still load.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum PickerType {
    Text,
    Multiline,
    Number,
    Checkbox,
    Dropdown,
    Color,
    DoubleDropdown,
    AssetAttribute,
    Unknown(String),
}

impl PickerType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "TEXT" => PickerType::Text,
            "MULTILINE" => PickerType::Multiline,
            "NUMBER" => PickerType::Number,
            "CHECKBOX" => PickerType::Checkbox,
            "DROPDOWN" => PickerType::Dropdown,
            "COLOR" => PickerType::Color,
            "DOUBLE_DROPDOWN" => PickerType::DoubleDropdown,
            "ASSET_ATTRIBUTE" => PickerType::AssetAttribute,
            other => PickerType::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            PickerType::Text => "TEXT",
            PickerType::Multiline => "MULTILINE",
            PickerType::Number => "NUMBER",
            PickerType::Checkbox => "CHECKBOX",
            PickerType::Dropdown => "DROPDOWN",
            PickerType::Color => "COLOR",
            PickerType::DoubleDropdown => "DOUBLE_DROPDOWN",
            PickerType::AssetAttribute => "ASSET_ATTRIBUTE",
            PickerType::Unknown(tag) => tag,
        }
    }
}

impl From<String> for PickerType {
    fn from(tag: String) -> Self {
        PickerType::from_tag(&tag)
    }
}

impl From<PickerType> for String {
    fn from(picker_type: PickerType) -> Self {
        picker_type.tag().to_string()
    }
}

/// One entry of a dropdown picker.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PickerOption {
    pub name: String,
    pub value: serde_json::Value,
}

impl PickerOption {
    pub fn new(name: &str, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Picker {
    #[serde(rename = "type")]
    pub picker_type: PickerType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PickerOption>,
}

impl Picker {
    pub fn new(picker_type: PickerType) -> Self {
        Self {
            picker_type,
            options: Vec::new(),
        }
    }

    pub fn dropdown(options: Vec<PickerOption>) -> Self {
        Self {
            picker_type: PickerType::Dropdown,
            options,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Internal {
    pub name: String,
    pub picker: Picker,
    #[serde(default)]
    pub value: InternalValue,
}

impl Internal {
    pub fn new(name: &str, picker: Picker) -> Self {
        Self {
            name: name.to_string(),
            picker,
            value: InternalValue::Empty,
        }
    }

    pub fn with_value(mut self, value: InternalValue) -> Self {
        self.value = value;
        self
    }
}
