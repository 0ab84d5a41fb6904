use crate::error::AppError;
use crate::model::Task;
use crate::storage::{ReminderState, TaskRepository};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "reminders.json";
const STORE_ENV_VAR: &str = "CACAODX_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredReminders {
    schema_version: u32,
    tasks: Vec<Task>,
    #[serde(default)]
    seeded_dates: BTreeSet<String>,
}

/// Keeps the reminder collection in a JSON file between runs.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::new(store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskRepository for JsonStore {
    fn load(&self) -> Result<ReminderState, AppError> {
        load_state(&self.path)
    }

    fn save(&mut self, state: &ReminderState) -> Result<(), AppError> {
        save_state(&self.path, state)
    }
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("cacaodx").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cacaodx")
            .join(STORE_FILE_NAME))
    }
}

pub fn load_state(path: &Path) -> Result<ReminderState, AppError> {
    if !path.exists() {
        return Ok(ReminderState::default());
    }

    let content = std::fs::read_to_string(path)?;
    let stored: StoredReminders = serde_json::from_str(&content)?;

    if stored.schema_version != SCHEMA_VERSION {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    let mut seen = HashSet::new();
    if let Some(task) = stored.tasks.iter().find(|task| !seen.insert(task.id.as_str())) {
        return Err(AppError::invalid_data(format!(
            "duplicate task id {}",
            task.id
        )));
    }

    Ok(ReminderState {
        tasks: stored.tasks,
        seeded_dates: stored.seeded_dates,
    })
}

pub fn save_state(path: &Path, state: &ReminderState) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let stored = StoredReminders {
        schema_version: SCHEMA_VERSION,
        tasks: state.tasks.clone(),
        seeded_dates: state.seeded_dates.clone(),
    };
    let content = serde_json::to_string_pretty(&stored)?;
    std::fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions)?;
    }

    log::debug!("saved {} tasks to {}", state.tasks.len(), path.display());
    Ok(())
}
