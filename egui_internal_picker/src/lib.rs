//! egui front end for flow node internals.
//!
//! [`InternalPicker`] wraps a [`flow_library::InternalEditor`] and draws the
//! control for its internal's picker type. Asset selection is delegated to an
//! [`AssetSelectionSurface`] shown in a [`Modal`].

pub mod modal;
pub mod scroll;
pub mod state;
pub mod surface;
pub mod theme;
pub mod variants;
pub mod widget;

pub use modal::Modal;
pub use state::PickerState;
pub use surface::{AssetListSurface, AssetSelectionSurface};
pub use theme::PickerTheme;
pub use widget::{InternalPicker, PickerResponse};
