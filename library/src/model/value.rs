use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize};

use super::color::Color;

/// Reference from an ASSET_ATTRIBUTE internal to one attribute of a remote asset.
///
/// `attribute_name` stays `None` until the asset's attributes have been loaded
/// and a matching eligible attribute confirmed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInternalValue {
    pub asset_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
}

impl AttributeInternalValue {
    /// Value stored right after an asset was chosen, before its attributes are known.
    pub fn provisional(asset_id: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            attribute_name: None,
        }
    }

    pub fn bound(asset_id: &str, attribute_name: &str) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            attribute_name: Some(attribute_name.to_string()),
        }
    }
}

/// Payload of an internal, keyed by the kind of editor that produced it.
///
/// Numbers use `OrderedFloat` so a NaN written by the number editor compares
/// equal to itself and is kept as-is.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InternalValue {
    #[default]
    Empty,
    Text(String),
    Number(#[serde(deserialize_with = "number_or_nan")] OrderedFloat<f64>),
    Boolean(bool),
    /// Dropdown selection, passed through exactly as the option or free text supplied it.
    Option(serde_json::Value),
    Color(Color),
    AssetAttribute(AttributeInternalValue),
}

impl InternalValue {
    pub fn number(value: f64) -> Self {
        InternalValue::Number(OrderedFloat(value))
    }

    /// Parses free text the way the number editor does: the longest leading
    /// decimal literal wins, and text without one becomes NaN.
    pub fn parse_number(input: &str) -> Self {
        InternalValue::number(parse_float_prefix(input))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, InternalValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            InternalValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            InternalValue::Number(n) => Some(n.into_inner()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InternalValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_option(&self) -> Option<&serde_json::Value> {
        match self {
            InternalValue::Option(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            InternalValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeInternalValue> {
        match self {
            InternalValue::AssetAttribute(v) => Some(v),
            _ => None,
        }
    }
}

impl From<String> for InternalValue {
    fn from(value: String) -> Self {
        InternalValue::Text(value)
    }
}

impl From<&str> for InternalValue {
    fn from(value: &str) -> Self {
        InternalValue::Text(value.to_string())
    }
}

impl From<f64> for InternalValue {
    fn from(value: f64) -> Self {
        InternalValue::number(value)
    }
}

impl From<bool> for InternalValue {
    fn from(value: bool) -> Self {
        InternalValue::Boolean(value)
    }
}

impl From<Color> for InternalValue {
    fn from(value: Color) -> Self {
        InternalValue::Color(value)
    }
}

impl From<AttributeInternalValue> for InternalValue {
    fn from(value: AttributeInternalValue) -> Self {
        InternalValue::AssetAttribute(value)
    }
}

/// serde_json writes NaN and infinities as `null`; read them back as NaN.
fn number_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderedFloat<f64>, D::Error> {
    Ok(OrderedFloat(
        Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN),
    ))
}

fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = j;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}
