//! Per-date chore lists.
//!
//! Every function here is pure over the task collection it is handed: reads
//! borrow it, mutations return the updated collection and leave the input
//! alone. Suggestions for a date are derived from the date alone, so the same
//! date always proposes the same chores without any stored state.

use crate::catalog::SUGGESTIONS_PER_DATE;
use crate::date_key;
use crate::error::AppError;
use crate::model::{Progress, Task};
use crate::seed::seeded_shuffle;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Date, OffsetDateTime};

static TASK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// First half of a two-step delete. Nothing is removed until [`confirm`].
///
/// [`confirm`]: DeletionRequest::confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
    pub task_id: String,
    pub text: String,
}

impl DeletionRequest {
    pub fn prompt(&self) -> String {
        format!("Delete \"{}\" ({})?", self.text, self.task_id)
    }

    pub fn confirm(self, tasks: &[Task]) -> Vec<Task> {
        delete_task(&self.task_id, tasks)
    }

    pub fn cancel(self) {
        log::debug!("deletion of {} cancelled", self.task_id);
    }
}

/// Tasks stored for `date`, in collection order.
pub fn tasks_on(date: &str, tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|task| task.is_on(date)).cloned().collect()
}

/// Returns the tasks already stored for `date`, or derives its suggestions
/// when there are none.
pub fn tasks_for_date(
    date: &str,
    existing: &[Task],
    catalog: &[String],
    palette: &[String],
) -> Result<Vec<Task>, AppError> {
    let parsed = date_key::parse_date(date)?;
    let key = date_key::format_date(parsed)?;

    let current = tasks_on(&key, existing);
    if !current.is_empty() {
        return Ok(current);
    }

    Ok(suggest_for_date(parsed, &key, catalog, palette))
}

fn suggest_for_date(date: Date, key: &str, catalog: &[String], palette: &[String]) -> Vec<Task> {
    let mut shuffled = catalog.to_vec();
    seeded_shuffle(&mut shuffled, date_key::date_seed(date));

    let tasks: Vec<Task> = shuffled
        .into_iter()
        .take(SUGGESTIONS_PER_DATE)
        .enumerate()
        .map(|(index, text)| Task {
            id: format!("{key}-{index}"),
            text,
            completed: false,
            color: palette_color(palette, index),
            date: key.to_string(),
        })
        .collect();

    log::debug!("generated {} suggestions for {key}", tasks.len());
    tasks
}

fn palette_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        String::new()
    } else {
        palette[index % palette.len()].clone()
    }
}

pub fn toggle_completion(task_id: &str, tasks: &[Task]) -> Vec<Task> {
    let mut updated = tasks.to_vec();
    if let Some(task) = updated.iter_mut().find(|task| task.id == task_id) {
        task.completed = !task.completed;
        log::debug!("task {task_id} is now {}", task.status().label());
    }
    updated
}

/// Starts a delete; `None` when no task has that id.
pub fn request_delete(task_id: &str, tasks: &[Task]) -> Option<DeletionRequest> {
    tasks
        .iter()
        .find(|task| task.id == task_id)
        .map(|task| DeletionRequest {
            task_id: task.id.clone(),
            text: task.text.clone(),
        })
}

pub fn delete_task(task_id: &str, tasks: &[Task]) -> Vec<Task> {
    let remaining: Vec<Task> = tasks
        .iter()
        .filter(|task| task.id != task_id)
        .cloned()
        .collect();
    if remaining.len() != tasks.len() {
        log::debug!("deleted task {task_id}");
    }
    remaining
}

pub fn add_task(
    text: &str,
    date: &str,
    tasks: &[Task],
    palette: &[String],
) -> Result<Vec<Task>, AppError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("task text is required"));
    }
    let key = date_key::normalize_date_key(date)?;

    let on_date = tasks.iter().filter(|task| task.is_on(&key)).count();
    let task = Task {
        id: next_task_id(tasks),
        text: trimmed.to_string(),
        completed: false,
        color: palette_color(palette, on_date),
        date: key,
    };
    log::debug!("added task {} on {}", task.id, task.date);

    let mut updated = tasks.to_vec();
    updated.push(task);
    Ok(updated)
}

fn next_task_id(tasks: &[Task]) -> String {
    loop {
        let sequence = TASK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let id = format!(
            "task-{}-{sequence}",
            OffsetDateTime::now_utc().unix_timestamp_nanos()
        );
        if !tasks.iter().any(|task| task.id == id) {
            return id;
        }
    }
}

pub fn progress(date: &str, tasks: &[Task]) -> Progress {
    let key = date_key::normalize_date_key(date).unwrap_or_else(|_| date.trim().to_string());
    tasks
        .iter()
        .filter(|task| task.is_on(&key))
        .fold(Progress::default(), |mut progress, task| {
            progress.total_count += 1;
            if task.completed {
                progress.completed_count += 1;
            }
            progress
        })
}
