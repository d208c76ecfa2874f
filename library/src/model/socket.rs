use serde::{Deserialize, Serialize};

/// Kind of data flowing through a socket.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeDataType {
    #[default]
    Any,
    Number,
    String,
    Boolean,
    Trigger,
    Color,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeSocket {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: NodeDataType,
}

impl NodeSocket {
    pub fn new(name: &str, data_type: NodeDataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }
}
