pub mod attribute_labels;
pub mod value_types;

pub use attribute_labels::{AttributeDescriptor, AttributeDescriptorRegistry, humanize};
pub use value_types::{ValueDescriptor, ValueDescriptorRegistry, socket_type_for};
