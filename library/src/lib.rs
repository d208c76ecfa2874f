//! Core of the flow editor's internal value pickers.
//!
//! [`model`] holds the flow document types, [`service`] the document store with
//! undo history, [`query`] the asset lookup plumbing, [`resolver`] the
//! asset-attribute selection state machine, and [`editor`] ties them together
//! into a UI-agnostic editing session per internal.

pub mod descriptor;
pub mod editor;
pub mod error;
pub mod model;
pub mod query;
pub mod resolver;
pub mod service;
pub mod settings;

pub use editor::{EditorEvent, EditorKind, EditorServices, FramePlan, InternalEditor};
pub use error::LibraryError;
pub use service::{FlowDocument, ProjectService};
pub use settings::PickerSettings;
