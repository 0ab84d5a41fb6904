use serde::{Deserialize, Serialize};

/// A chore scheduled on a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub color: String,
    /// ISO `YYYY-MM-DD`; tasks are partitioned by this key.
    pub date: String,
}

impl Task {
    pub fn status(&self) -> TaskStatus {
        if self.completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        }
    }

    pub fn is_on(&self, date: &str) -> bool {
        self.date == date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed_count: usize,
    pub total_count: usize,
}

impl Progress {
    /// `None` when the date has no tasks.
    pub fn ratio(&self) -> Option<f64> {
        if self.total_count == 0 {
            None
        } else {
            Some(self.completed_count as f64 / self.total_count as f64)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
