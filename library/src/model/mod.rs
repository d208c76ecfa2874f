pub mod asset;
pub mod color;
pub mod internal;
pub mod node;
pub mod project;
pub mod socket;
pub mod value;

pub use asset::{Asset, AssetAttribute, MetaMap};
pub use color::Color;
pub use internal::{Internal, Picker, PickerOption, PickerType};
pub use node::{FlowNode, NodeSize};
pub use project::FlowProject;
pub use socket::{NodeDataType, NodeSocket};
pub use value::{AttributeInternalValue, InternalValue};
