pub mod dispatch;
pub mod internal_editor;
pub mod scroll;
pub mod selection;

pub use dispatch::{EditorKind, dispatch};
pub use internal_editor::{EditorEvent, EditorServices, FramePlan, InternalEditor};
pub use selection::{SelectedEntity, SelectionRequest};
