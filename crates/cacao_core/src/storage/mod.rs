use crate::error::AppError;
use crate::model::Task;
use std::collections::BTreeSet;

pub mod json_store;

pub use json_store::JsonStore;

/// Everything a reminder collection needs to survive between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderState {
    pub tasks: Vec<Task>,
    /// Dates whose suggestions were generated at least once.
    pub seeded_dates: BTreeSet<String>,
}

pub trait TaskRepository {
    fn load(&self) -> Result<ReminderState, AppError>;

    fn save(&mut self, state: &ReminderState) -> Result<(), AppError>;
}

/// Session-scoped storage; the state is gone when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: ReminderState,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for MemoryStore {
    fn load(&self) -> Result<ReminderState, AppError> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &ReminderState) -> Result<(), AppError> {
        self.state = state.clone();
        Ok(())
    }
}

impl<R: TaskRepository + ?Sized> TaskRepository for Box<R> {
    fn load(&self) -> Result<ReminderState, AppError> {
        (**self).load()
    }

    fn save(&mut self, state: &ReminderState) -> Result<(), AppError> {
        (**self).save(state)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, ReminderState, TaskRepository};
    use crate::model::Task;

    #[test]
    fn memory_store_starts_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), ReminderState::default());
    }

    #[test]
    fn memory_store_keeps_saved_state() {
        let mut store = MemoryStore::new();
        let state = ReminderState {
            tasks: vec![Task {
                id: "2024-05-01-0".to_string(),
                text: "Prune pods".to_string(),
                completed: false,
                color: "#FF6B6B".to_string(),
                date: "2024-05-01".to_string(),
            }],
            seeded_dates: ["2024-05-01".to_string()].into_iter().collect(),
        };

        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), state);
    }
}
