use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Project error: {0}")]
    Project(String),
    #[error("Node {0} not found")]
    NodeNotFound(Uuid),
    #[error("Node {node_id} has no internal at index {index}")]
    InternalNotFound { node_id: Uuid, index: usize },
    #[error("Asset query error: {0}")]
    Query(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<Box<dyn std::error::Error>> for LibraryError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        LibraryError::Runtime(err.to_string())
    }
}
