use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::internal::Internal;
use super::socket::NodeSocket;

/// Size hint written by the picker's layout observer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NodeSize {
    pub x: f32,
    pub y: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FlowNode {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub internals: Vec<Internal>,
    #[serde(default)]
    pub inputs: Vec<NodeSocket>,
    #[serde(default)]
    pub outputs: Vec<NodeSocket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<NodeSize>,
}

impl FlowNode {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            internals: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            size: None,
        }
    }

    pub fn with_internal(mut self, internal: Internal) -> Self {
        self.internals.push(internal);
        self
    }

    pub fn with_input(mut self, socket: NodeSocket) -> Self {
        self.inputs.push(socket);
        self
    }

    pub fn with_output(mut self, socket: NodeSocket) -> Self {
        self.outputs.push(socket);
        self
    }

    /// The socket whose type follows an asset attribute: the first output,
    /// falling back to the first input.
    pub fn first_socket_mut(&mut self) -> Option<&mut NodeSocket> {
        if !self.outputs.is_empty() {
            self.outputs.first_mut()
        } else {
            self.inputs.first_mut()
        }
    }

    pub fn first_socket(&self) -> Option<&NodeSocket> {
        self.outputs.first().or_else(|| self.inputs.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::socket::NodeDataType;

    #[test]
    fn output_socket_is_preferred_over_input() {
        let mut node = FlowNode::new("read")
            .with_input(NodeSocket::new("in", NodeDataType::Any))
            .with_output(NodeSocket::new("out", NodeDataType::Any));
        assert_eq!(node.first_socket_mut().unwrap().name, "out");

        let mut input_only = FlowNode::new("write").with_input(NodeSocket::new("in", NodeDataType::Any));
        assert_eq!(input_only.first_socket_mut().unwrap().name, "in");

        assert!(FlowNode::new("bare").first_socket().is_none());
    }
}
