//! The document-store contract the internal editor depends on.

use uuid::Uuid;

use crate::error::LibraryError;
use crate::model::{Internal, InternalValue, NodeDataType, NodeSize};

/// Mutation and undo interface of the flow document as seen by an internal editor.
///
/// Methods take `&self`; implementations guard their state internally so a
/// single store can be shared by every mounted editor.
pub trait FlowDocument {
    /// Records an undo point for the current document state.
    fn create_undo_snapshot(&self);

    /// Tells observers that the document is about to change or has changed.
    fn notify_change(&self);

    /// Current state of one internal slot.
    fn internal(&self, node_id: Uuid, internal_index: usize) -> Result<Internal, LibraryError>;

    fn node_size(&self, node_id: Uuid) -> Result<Option<NodeSize>, LibraryError>;

    /// Overwrites the value of one internal slot. No validation is performed.
    fn set_internal_value(
        &self,
        node_id: Uuid,
        internal_index: usize,
        value: InternalValue,
    ) -> Result<(), LibraryError>;

    /// Sets the type of the node's first output socket, or first input socket
    /// when there are no outputs. Returns `false` when the node has neither.
    fn set_first_socket_type(
        &self,
        node_id: Uuid,
        data_type: NodeDataType,
    ) -> Result<bool, LibraryError>;

    fn set_node_size(&self, node_id: Uuid, size: NodeSize) -> Result<(), LibraryError>;
}
