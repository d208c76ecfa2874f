pub mod document;
pub mod history;
pub mod project_service;

pub use document::FlowDocument;
pub use history::HistoryManager;
pub use project_service::{ChangeListener, ProjectService};
