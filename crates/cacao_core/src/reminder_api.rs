use crate::catalog;
use crate::date_key;
use crate::error::AppError;
use crate::model::{Progress, Task};
use crate::reminders::{self, DeletionRequest};
use crate::storage::{ReminderState, TaskRepository};

/// The reminder list as a presentation layer sees it: a repository plus the
/// catalog and palette suggestions are drawn from.
#[derive(Debug)]
pub struct ReminderBook<R> {
    repository: R,
    catalog: Vec<String>,
    palette: Vec<String>,
}

impl<R: TaskRepository> ReminderBook<R> {
    pub fn new(repository: R, catalog: Vec<String>, palette: Vec<String>) -> Result<Self, AppError> {
        let palette = catalog::clean_entries(palette);
        if palette.is_empty() {
            return Err(AppError::invalid_input("palette needs at least one color"));
        }

        Ok(Self {
            repository,
            catalog: catalog::clean_entries(catalog),
            palette,
        })
    }

    pub fn with_defaults(repository: R) -> Result<Self, AppError> {
        Self::new(
            repository,
            catalog::default_catalog(),
            catalog::default_palette(),
        )
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Swaps the suggestion source. Dates already seeded keep their tasks.
    pub fn set_suggestions(
        &mut self,
        catalog: Vec<String>,
        palette: Vec<String>,
    ) -> Result<(), AppError> {
        let palette = catalog::clean_entries(palette);
        if palette.is_empty() {
            return Err(AppError::invalid_input("palette needs at least one color"));
        }
        self.catalog = catalog::clean_entries(catalog);
        self.palette = palette;
        Ok(())
    }

    /// Tasks for `date`, generating its suggestions on the first view.
    pub fn view(&mut self, date: &str) -> Result<Vec<Task>, AppError> {
        let key = date_key::normalize_date_key(date)?;
        let mut state = self.repository.load()?;

        if self.seed_date(&mut state, &key)? {
            self.repository.save(&state)?;
        }

        Ok(reminders::tasks_on(&key, &state.tasks))
    }

    /// Returns the toggled task, or `None` when the id is unknown.
    pub fn toggle(&mut self, task_id: &str) -> Result<Option<Task>, AppError> {
        let trimmed_id = task_id.trim();
        let mut state = self.repository.load()?;
        if !state.tasks.iter().any(|task| task.id == trimmed_id) {
            return Ok(None);
        }

        state.tasks = reminders::toggle_completion(trimmed_id, &state.tasks);
        self.repository.save(&state)?;

        Ok(state.tasks.into_iter().find(|task| task.id == trimmed_id))
    }

    pub fn request_delete(&self, task_id: &str) -> Result<Option<DeletionRequest>, AppError> {
        let state = self.repository.load()?;
        Ok(reminders::request_delete(task_id.trim(), &state.tasks))
    }

    /// Applies a confirmed deletion. `false` when the task was already gone.
    pub fn confirm_delete(&mut self, request: DeletionRequest) -> Result<bool, AppError> {
        let mut state = self.repository.load()?;
        let before = state.tasks.len();
        state.tasks = request.confirm(&state.tasks);
        if state.tasks.len() == before {
            return Ok(false);
        }

        self.repository.save(&state)?;
        Ok(true)
    }

    /// Adds a user task to the list shown for `date`, seeding the date's
    /// suggestions first when it has never been viewed.
    pub fn add(&mut self, text: &str, date: &str) -> Result<Task, AppError> {
        let key = date_key::normalize_date_key(date)?;
        let mut state = self.repository.load()?;

        self.seed_date(&mut state, &key)?;
        state.tasks = reminders::add_task(text, &key, &state.tasks, &self.palette)?;
        self.repository.save(&state)?;

        state
            .tasks
            .pop()
            .ok_or_else(|| AppError::invalid_data("added task missing from collection"))
    }

    pub fn progress(&self, date: &str) -> Result<Progress, AppError> {
        let key = date_key::normalize_date_key(date)?;
        let state = self.repository.load()?;
        Ok(reminders::progress(&key, &state.tasks))
    }

    pub fn tasks(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.repository.load()?.tasks)
    }

    fn seed_date(&self, state: &mut ReminderState, key: &str) -> Result<bool, AppError> {
        if state.seeded_dates.contains(key) || state.tasks.iter().any(|task| task.is_on(key)) {
            return Ok(false);
        }

        let generated =
            reminders::tasks_for_date(key, &state.tasks, &self.catalog, &self.palette)?;
        state.tasks.extend(generated);
        state.seeded_dates.insert(key.to_string());
        Ok(true)
    }
}
