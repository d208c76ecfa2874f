use crate::model::project::FlowProject;

/// Snapshot-based undo/redo for the flow document.
pub struct HistoryManager {
    undo_stack: Vec<FlowProject>,
    redo_stack: Vec<FlowProject>,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HistoryManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records the state to return to on the next undo. Clears the redo stack.
    /// The oldest snapshot is dropped once the capacity is reached.
    pub fn push_snapshot(&mut self, project: FlowProject) {
        if self.undo_stack.len() == self.capacity {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(project);
        self.redo_stack.clear();
    }

    /// Pops the last snapshot and parks `current` on the redo stack.
    pub fn undo(&mut self, current: FlowProject) -> Option<FlowProject> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Inverse of [`HistoryManager::undo`].
    pub fn redo(&mut self, current: FlowProject) -> Option<FlowProject> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> FlowProject {
        FlowProject::new(name)
    }

    #[test]
    fn undo_then_redo_restores_states() {
        let mut history = HistoryManager::default();
        history.push_snapshot(named("before"));

        let restored = history.undo(named("after")).unwrap();
        assert_eq!(restored.name, "before");
        assert!(!history.can_undo());

        let redone = history.redo(named("before")).unwrap();
        assert_eq!(redone.name, "after");
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_snapshot_clears_redo() {
        let mut history = HistoryManager::default();
        history.push_snapshot(named("a"));
        history.undo(named("b"));
        assert!(history.can_redo());
        history.push_snapshot(named("c"));
        assert!(!history.can_redo());
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut history = HistoryManager::new(2);
        history.push_snapshot(named("1"));
        history.push_snapshot(named("2"));
        history.push_snapshot(named("3"));
        assert_eq!(history.undo(named("4")).unwrap().name, "3");
        assert_eq!(history.undo(named("3")).unwrap().name, "2");
        assert!(history.undo(named("2")).is_none());
    }
}
