//! Which remote attributes may be linked to an ASSET_ATTRIBUTE internal.

use serde_json::Value;

use crate::model::{AssetAttribute, MetaMap};
use crate::settings::MetaKeys;

/// JSON truthiness: `null`, `false`, `0`, NaN and `""` are falsy, everything else truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// An attribute qualifies when its meta has a truthy rule-state item, or has an
/// agent-link item with any value at all. Attributes without meta never qualify.
/// A falsy rule-state next to an agent-link item still qualifies.
pub fn is_eligible(meta: Option<&MetaMap>, keys: &MetaKeys) -> bool {
    let Some(meta) = meta else {
        return false;
    };
    let rule_state = meta.get(&keys.rule_state).is_some_and(is_truthy);
    rule_state || meta.contains_key(&keys.agent_link)
}

pub fn is_eligible_attribute(attribute: &AssetAttribute, keys: &MetaKeys) -> bool {
    is_eligible(attribute.meta.as_ref(), keys)
}
