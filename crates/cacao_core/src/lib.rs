pub mod account;
pub mod catalog;
pub mod config;
pub mod date_key;
pub mod error;
pub mod model;
pub mod reminder_api;
pub mod reminders;
pub mod seed;
pub mod storage;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Task, TaskStatus};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: "2024-05-01-0".to_string(),
            text: "Prune pods".to_string(),
            completed: false,
            color: "#FF6B6B".to_string(),
            date: "2024-05-01".to_string(),
        };

        assert_eq!(task.id, "2024-05-01-0");
        assert_eq!(task.text, "Prune pods");
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.color, "#FF6B6B");
        assert!(task.is_on("2024-05-01"));
        assert!(!task.is_on("2024-05-02"));
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("task text is required");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.to_string(), "invalid_input - task text is required");
        assert!(err.is_recoverable());
        assert!(!AppError::io("disk full").is_recoverable());
    }
}
