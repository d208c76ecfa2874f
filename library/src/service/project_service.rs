use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use log::debug;
use uuid::Uuid;

use crate::error::LibraryError;
use crate::model::{FlowNode, FlowProject, Internal, InternalValue, NodeDataType, NodeSize};
use crate::service::document::FlowDocument;
use crate::service::history::HistoryManager;

/// Called with the new project revision after every `notify_change`.
pub type ChangeListener = Box<dyn Fn(u64) + Send + Sync>;

/// Owns the flow project and serializes every mutation the editors make.
pub struct ProjectService {
    project: Arc<RwLock<FlowProject>>,
    history: Mutex<HistoryManager>,
    revision: AtomicU64,
    listeners: RwLock<Vec<ChangeListener>>,
}

impl ProjectService {
    pub fn new(project: FlowProject) -> Self {
        Self {
            project: Arc::new(RwLock::new(project)),
            history: Mutex::new(HistoryManager::default()),
            revision: AtomicU64::new(0),
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn get_project(&self) -> Arc<RwLock<FlowProject>> {
        Arc::clone(&self.project)
    }

    pub fn snapshot(&self) -> Result<FlowProject, LibraryError> {
        let project = self.project.read().map_err(|e| {
            LibraryError::Runtime(format!("Failed to acquire project read lock: {}", e))
        })?;
        Ok(project.clone())
    }

    pub fn set_project(&self, new_project: FlowProject) -> Result<(), LibraryError> {
        let mut project_write = self.project.write().map_err(|e| {
            LibraryError::Runtime(format!("Failed to acquire project write lock: {}", e))
        })?;
        *project_write = new_project;
        Ok(())
    }

    pub fn load_project(&self, json_str: &str) -> Result<(), LibraryError> {
        let new_project = FlowProject::load(json_str)?;
        self.set_project(new_project)
    }

    pub fn save_project(&self) -> Result<String, LibraryError> {
        let project_read = self.project.read().map_err(|e| {
            LibraryError::Runtime(format!("Failed to acquire project read lock: {}", e))
        })?;
        Ok(project_read.save()?)
    }

    pub fn node(&self, node_id: Uuid) -> Result<FlowNode, LibraryError> {
        let project_read = self.project.read().map_err(|e| {
            LibraryError::Runtime(format!("Failed to acquire project read lock: {}", e))
        })?;
        project_read
            .get_node(node_id)
            .cloned()
            .ok_or(LibraryError::NodeNotFound(node_id))
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self, listener: ChangeListener) {
        match self.listeners.write() {
            Ok(mut listeners) => listeners.push(listener),
            Err(e) => log::error!("Failed to register change listener: {}", e),
        }
    }

    /// Restores the last undo snapshot. Returns `Ok(false)` when there is none.
    pub fn undo(&self) -> Result<bool, LibraryError> {
        let current = self.snapshot()?;
        let restored = self.with_history(|h| h.undo(current))?;
        self.restore(restored)
    }

    pub fn redo(&self) -> Result<bool, LibraryError> {
        let current = self.snapshot()?;
        let restored = self.with_history(|h| h.redo(current))?;
        self.restore(restored)
    }

    pub fn can_undo(&self) -> bool {
        self.with_history(|h| h.can_undo()).unwrap_or(false)
    }

    pub fn can_redo(&self) -> bool {
        self.with_history(|h| h.can_redo()).unwrap_or(false)
    }

    fn restore(&self, project: Option<FlowProject>) -> Result<bool, LibraryError> {
        match project {
            Some(project) => {
                self.set_project(project)?;
                self.notify_change();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn with_history<R>(&self, f: impl FnOnce(&mut HistoryManager) -> R) -> Result<R, LibraryError> {
        let mut history = self.history.lock().map_err(|e| {
            LibraryError::Runtime(format!("Failed to acquire history lock: {}", e))
        })?;
        Ok(f(&mut history))
    }

    fn with_node_mut<R>(
        &self,
        node_id: Uuid,
        f: impl FnOnce(&mut FlowNode) -> Result<R, LibraryError>,
    ) -> Result<R, LibraryError> {
        let mut project_write = self.project.write().map_err(|e| {
            LibraryError::Runtime(format!("Failed to acquire project write lock: {}", e))
        })?;
        let node = project_write
            .get_node_mut(node_id)
            .ok_or(LibraryError::NodeNotFound(node_id))?;
        f(node)
    }
}

impl FlowDocument for ProjectService {
    fn create_undo_snapshot(&self) {
        let snapshot = match self.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Failed to create undo snapshot: {}", e);
                return;
            }
        };
        if let Err(e) = self.with_history(|h| h.push_snapshot(snapshot)) {
            log::error!("Failed to create undo snapshot: {}", e);
        }
    }

    fn notify_change(&self) {
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Project changed, revision {}", revision);
        match self.listeners.read() {
            Ok(listeners) => {
                for listener in listeners.iter() {
                    listener(revision);
                }
            }
            Err(e) => log::error!("Failed to notify change listeners: {}", e),
        }
    }

    fn internal(&self, node_id: Uuid, internal_index: usize) -> Result<Internal, LibraryError> {
        let node = self.node(node_id)?;
        node.internals
            .get(internal_index)
            .cloned()
            .ok_or(LibraryError::InternalNotFound {
                node_id,
                index: internal_index,
            })
    }

    fn node_size(&self, node_id: Uuid) -> Result<Option<NodeSize>, LibraryError> {
        Ok(self.node(node_id)?.size)
    }

    fn set_internal_value(
        &self,
        node_id: Uuid,
        internal_index: usize,
        value: InternalValue,
    ) -> Result<(), LibraryError> {
        self.with_node_mut(node_id, |node| {
            let internal = node.internals.get_mut(internal_index).ok_or(
                LibraryError::InternalNotFound {
                    node_id,
                    index: internal_index,
                },
            )?;
            internal.value = value;
            Ok(())
        })
    }

    fn set_first_socket_type(
        &self,
        node_id: Uuid,
        data_type: NodeDataType,
    ) -> Result<bool, LibraryError> {
        self.with_node_mut(node_id, |node| match node.first_socket_mut() {
            Some(socket) => {
                socket.data_type = data_type;
                Ok(true)
            }
            None => Ok(false),
        })
    }

    fn set_node_size(&self, node_id: Uuid, size: NodeSize) -> Result<(), LibraryError> {
        self.with_node_mut(node_id, |node| {
            node.size = Some(size);
            Ok(())
        })
    }
}
