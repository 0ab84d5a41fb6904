use cacao_cli::cli::{Cli, Command, ConfigOverrideTarget, parse_config_override};
use cacao_core::account;
use cacao_core::config::{self, Config, ConfigOverrides};
use cacao_core::date_key;
use cacao_core::error::AppError;
use cacao_core::model::{Progress, Task};
use cacao_core::reminder_api::ReminderBook;
use cacao_core::reminders::DeletionRequest;
use cacao_core::storage::{JsonStore, MemoryStore, TaskRepository};
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Color")]
    color: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            status: task.status().label(),
            color: task.color.clone(),
        }
    }
}

/// What a command left for the caller to finish.
enum Outcome {
    Done,
    PendingDeletion(DeletionRequest),
}

fn print_tasks_plain(tasks: &[Task]) {
    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
}

fn progress_line(date: &str, progress: &Progress) -> String {
    if progress.is_empty() {
        format!("No tasks for {date}")
    } else {
        format!(
            "Progress for {date}: {}/{} done",
            progress.completed_count, progress.total_count
        )
    }
}

fn print_task_json(task: &Task) {
    let json = serde_json::json!({
        "id": task.id,
        "text": task.text,
        "completed": task.completed,
        "status": task.status(),
        "color": task.color,
        "date": task.date,
    });
    println!("{}", json);
}

fn print_date_json(date: &str, tasks: &[Task], progress: &Progress) {
    let json = serde_json::json!({
        "date": date,
        "tasks": tasks,
        "progress": progress,
    });
    println!("{}", json);
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
        } else if in_quotes && ch == '\\' {
            escape = true;
        } else if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }
    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn parse_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for value in raw {
        let parsed = parse_config_override(value).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Catalog => overrides.catalog = Some(parsed.entries()),
            ConfigOverrideTarget::Palette => overrides.palette = Some(parsed.entries()),
            ConfigOverrideTarget::LogLevel => overrides.log_level = Some(parsed.value),
        }
    }
    Ok(overrides)
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .format_timestamp(None)
        .init();
}

fn resolve_date(date: Option<&str>) -> Result<String, AppError> {
    match date {
        Some(value) => date_key::normalize_date_key(value),
        None => date_key::today_key(),
    }
}

fn run_command<R: TaskRepository>(
    book: &mut ReminderBook<R>,
    cli: &Cli,
) -> Result<Outcome, AppError> {
    match &cli.command {
        Command::View { date } => {
            let date = resolve_date(date.as_deref())?;
            let tasks = book.view(&date)?;
            let progress = book.progress(&date)?;
            if cli.json {
                print_date_json(&date, &tasks, &progress);
            } else if tasks.is_empty() {
                println!("{}", progress_line(&date, &progress));
            } else {
                println!("To-Do List for {date}");
                print_tasks_plain(&tasks);
                println!("{}", progress_line(&date, &progress));
            }
        }
        Command::Toggle { id } => match book.toggle(id)? {
            Some(task) if cli.json => print_task_json(&task),
            Some(task) => {
                let verb = if task.completed { "Completed" } else { "Reopened" };
                println!("{verb} task: {} ({})", task.text, task.id);
            }
            None => println!("No task with id {}", id.trim()),
        },
        Command::Delete { id, yes } => match book.request_delete(id)? {
            Some(request) if *yes => {
                let text = request.text.clone();
                let task_id = request.task_id.clone();
                book.confirm_delete(request)?;
                println!("Deleted task: {text} ({task_id})");
            }
            Some(request) => return Ok(Outcome::PendingDeletion(request)),
            None => println!("No task with id {}", id.trim()),
        },
        Command::Add { text, date } => {
            let text = match text {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("task text is required")),
            };
            let date = resolve_date(date.as_deref())?;

            let task = book.add(text, &date)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added task: {} ({}) on {}", task.text, task.id, task.date);
            }
        }
        Command::Progress { date } => {
            let date = resolve_date(date.as_deref())?;
            let progress = book.progress(&date)?;
            if cli.json {
                let json = serde_json::json!({
                    "date": date,
                    "completed_count": progress.completed_count,
                    "total_count": progress.total_count,
                    "ratio": progress.ratio(),
                });
                println!("{}", json);
            } else {
                println!("{}", progress_line(&date, &progress));
            }
        }
        Command::List => {
            let tasks = book.tasks()?;
            if cli.json {
                println!("{}", serde_json::json!(tasks));
            } else if tasks.is_empty() {
                println!("No tasks stored");
            } else {
                print_tasks_plain(&tasks);
            }
        }
        Command::PasswordStrength { password } => {
            let strength = account::password_strength(password);
            if cli.json {
                let json = serde_json::json!({
                    "strength": strength.label(),
                    "color": strength.color(),
                    "fill_percent": strength.fill_percent(),
                });
                println!("{}", json);
            } else {
                println!("Password strength: {}", strength.label());
            }
        }
        Command::CheckPasswordChange {
            current,
            new,
            confirm,
        } => {
            account::validate_password_change(current, new, confirm)?;
            let strength = account::password_strength(new);
            if cli.json {
                let json = serde_json::json!({
                    "accepted": true,
                    "strength": strength.label(),
                });
                println!("{}", json);
            } else {
                println!("Password change accepted (strength: {})", strength.label());
            }
        }
    }

    Ok(Outcome::Done)
}

fn apply_overrides<R: TaskRepository>(
    book: &mut ReminderBook<R>,
    base: &Config,
    raw: &[String],
) -> Result<(), AppError> {
    let overrides = parse_overrides(raw)?;
    if overrides.log_level.is_some() {
        return Err(AppError::invalid_input(
            "log_level cannot change inside a session; restart with it set",
        ));
    }
    // Each command starts from the session's base suggestions.
    let merged = config::merge_overrides(base, &overrides);
    book.set_suggestions(merged.catalog(), merged.palette())
}

fn answered_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn run_interactive(base: &Config) -> Result<(), AppError> {
    let mut book = ReminderBook::new(MemoryStore::new(), base.catalog(), base.palette())?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(line) = lines.next() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) if args.is_empty() => continue,
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("cacaodx".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        let outcome = apply_overrides(&mut book, base, &cli.config_override)
            .and_then(|_| run_command(&mut book, &cli));
        match outcome {
            Ok(Outcome::Done) => {}
            Ok(Outcome::PendingDeletion(request)) => {
                println!("{} [y/N]", request.prompt());
                let answer = lines.next().transpose()?.unwrap_or_default();
                if answered_yes(&answer) {
                    let text = request.text.clone();
                    book.confirm_delete(request)?;
                    println!("Deleted task: {text}");
                } else {
                    request.cancel();
                    println!("Kept task");
                }
            }
            Err(err) => eprintln!("ERROR: {}", err),
        }
    }

    Ok(())
}

fn open_book(cli: &Cli, config: &Config) -> Result<ReminderBook<Box<dyn TaskRepository>>, AppError> {
    let repository: Box<dyn TaskRepository> = if cli.memory {
        Box::new(MemoryStore::new())
    } else {
        let store = JsonStore::from_env()?;
        log::debug!("using reminder store at {}", store.path().display());
        Box::new(store)
    };
    ReminderBook::new(repository, config.catalog(), config.palette())
}

fn run_once(cli: Cli, config: &Config) -> Result<(), AppError> {
    let mut book = open_book(&cli, config)?;
    if let Outcome::PendingDeletion(request) = run_command(&mut book, &cli)? {
        println!("{} Re-run with --yes to confirm.", request.prompt());
    }
    Ok(())
}

fn main() {
    let loaded = config::load_config_with_fallback();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        init_logging(&loaded.config);
        if let Some(err) = loaded.error.as_ref() {
            log::warn!("ignoring config: {err}");
        }
        if let Err(err) = run_interactive(&loaded.config) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let config = match parse_overrides(&cli.config_override) {
        Ok(overrides) => config::merge_overrides(&loaded.config, &overrides),
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };
    init_logging(&config);
    if let Some(err) = loaded.error.as_ref() {
        log::warn!("ignoring config: {err}");
    }

    if let Err(err) = run_once(cli, &config) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
