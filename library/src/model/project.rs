use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::node::FlowNode;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct FlowProject {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
}

impl FlowProject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: Vec::new(),
        }
    }

    pub fn load(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    pub fn save(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn add_node(&mut self, node: FlowNode) -> Uuid {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    pub fn get_node(&self, id: Uuid) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_node_mut(&mut self, id: Uuid) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }
}
