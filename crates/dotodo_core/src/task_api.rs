use crate::config::{self, StoreConfig};
use crate::error::AppError;
use crate::id::{self, IdStrategy};
use crate::model::{Task, TaskId};
use crate::runner::{CommandRunner, runner_from_env};
use crate::storage::json_store;
use crate::storage::layout::StoreLayout;
use crate::storage::ledger;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// What `add_task` needs to know about the new record.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub important: bool,
    pub command_to_run: String,
}

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub example: bool,
    pub id_strategy: IdStrategy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub completed: bool,
    pub uncompleted: bool,
    pub important: bool,
}

/// Completion result: the updated task, plus the follow-up command report
/// when one ran.
#[derive(Debug)]
pub struct CompleteOutcome {
    pub task: Task,
    pub command: Option<CommandReport>,
}

#[derive(Debug)]
pub struct CommandReport {
    pub command: String,
    pub output: String,
    pub error: Option<AppError>,
}

pub fn init_store(options: &InitOptions) -> Result<Vec<Task>, AppError> {
    init_store_with_layout(&StoreLayout::from_env(), options)
}

pub fn add_task(new_task: &NewTask) -> Result<Task, AppError> {
    add_task_with_layout(&StoreLayout::from_env(), new_task)
}

pub fn list_tasks(filter: ListFilter) -> Result<Vec<Task>, AppError> {
    list_tasks_with_layout(&StoreLayout::from_env(), filter)
}

pub fn complete_task(id: &str) -> Result<CompleteOutcome, AppError> {
    complete_task_with_layout(&StoreLayout::from_env(), id, runner_from_env().as_ref())
}

pub fn remove_store() -> Result<(), AppError> {
    remove_store_with_layout(&StoreLayout::from_env())
}

fn init_store_with_layout(
    layout: &StoreLayout,
    options: &InitOptions,
) -> Result<Vec<Task>, AppError> {
    if layout.exists() {
        return Err(AppError::invalid_input(format!(
            "{} already exists",
            layout.root().display()
        )));
    }

    std::fs::create_dir_all(layout.root()).map_err(|err| AppError::io(err.to_string()))?;
    ledger::ensure_exists(&layout.ids_file())?;

    let store_config = StoreConfig::with_strategy(options.id_strategy);
    config::save_config(layout, &store_config)?;

    let tasks = if options.example {
        example_tasks(layout, &store_config)?
    } else {
        Vec::new()
    };
    json_store::save_tasks(&layout.tasks_file(), &tasks)?;

    Ok(tasks)
}

fn add_task_with_layout(layout: &StoreLayout, new_task: &NewTask) -> Result<Task, AppError> {
    let name = new_task.name.trim();
    if name.is_empty() {
        return Err(AppError::invalid_input("name is required"));
    }

    let mut tasks = json_store::load_tasks(&layout.tasks_file())?;
    let store_config = config::load_config(layout)?;

    let task = Task {
        name: name.to_string(),
        id: allocate_id(layout, &store_config, &tasks)?,
        description: new_task.description.trim().to_string(),
        created_at: format_timestamp(OffsetDateTime::now_utc())?,
        completed_at: None,
        important: new_task.important,
        command_to_run: new_task.command_to_run.trim().to_string(),
    };

    tasks.push(task.clone());
    json_store::save_tasks(&layout.tasks_file(), &tasks)?;

    Ok(task)
}

fn list_tasks_with_layout(layout: &StoreLayout, filter: ListFilter) -> Result<Vec<Task>, AppError> {
    let tasks = json_store::load_tasks(&layout.tasks_file())?;
    Ok(filter_tasks(&tasks, filter))
}

/// The completion flags form one dimension: either alone narrows to its
/// subset, both together cover both subsets. The importance flag narrows
/// independently. Output keeps insertion order.
pub fn filter_tasks(tasks: &[Task], filter: ListFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| {
            if filter.completed || filter.uncompleted {
                let keep = (filter.completed && task.is_completed())
                    || (filter.uncompleted && !task.is_completed());
                if !keep {
                    return false;
                }
            }

            !filter.important || task.important
        })
        .cloned()
        .collect()
}

fn complete_task_with_layout(
    layout: &StoreLayout,
    id: &str,
    runner: &dyn CommandRunner,
) -> Result<CompleteOutcome, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let mut tasks = json_store::load_tasks(&layout.tasks_file())?;
    let mut completed_task = None;

    for task in &mut tasks {
        if task.id.matches(trimmed_id) {
            if task.completed_at.is_some() {
                return Err(AppError::already_completed(format!(
                    "task {trimmed_id} is already completed"
                )));
            }

            task.completed_at = Some(format_timestamp(OffsetDateTime::now_utc())?);
            completed_task = Some(task.clone());
            break;
        }
    }

    let task = completed_task
        .ok_or_else(|| AppError::task_not_found(format!("no task with id {trimmed_id}")))?;

    // Completion is saved before the follow-up command runs; a failing
    // command never rolls it back.
    json_store::save_tasks(&layout.tasks_file(), &tasks)?;

    let command = task.command_to_run.trim();
    let report = if command.is_empty() {
        None
    } else {
        Some(run_follow_up(runner, command))
    };

    Ok(CompleteOutcome {
        task,
        command: report,
    })
}

fn run_follow_up(runner: &dyn CommandRunner, command: &str) -> CommandReport {
    match runner.run(command) {
        Ok(output) => {
            let error = if output.success() {
                None
            } else {
                Some(AppError::command_failed(match output.code {
                    Some(code) => format!("command exited with status {code}"),
                    None => "command terminated by signal".to_string(),
                }))
            };

            CommandReport {
                command: command.to_string(),
                output: output.output,
                error,
            }
        }
        Err(err) => CommandReport {
            command: command.to_string(),
            output: String::new(),
            error: Some(err),
        },
    }
}

fn remove_store_with_layout(layout: &StoreLayout) -> Result<(), AppError> {
    if !layout.exists() {
        return Err(AppError::store_missing(format!(
            "{} does not exist",
            layout.root().display()
        )));
    }

    std::fs::remove_dir_all(layout.root()).map_err(|err| AppError::io(err.to_string()))
}

/// The 2x2 grid of {important} x {completed a day ago, pending}, plus one
/// bonus pending task.
fn example_tasks(layout: &StoreLayout, store_config: &StoreConfig) -> Result<Vec<Task>, AppError> {
    let now = OffsetDateTime::now_utc();
    let created_at = format_timestamp(now)?;
    let completed_at = format_timestamp(now - Duration::days(1))?;

    let mut tasks = Vec::new();
    let mut count = 1;

    for important in [false, true] {
        for completed in [None, Some(completed_at.clone())] {
            tasks.push(Task {
                name: format!("Task{count}"),
                id: allocate_id(layout, store_config, &tasks)?,
                description: "Auto-generated task".to_string(),
                created_at: created_at.clone(),
                completed_at: completed,
                important,
                command_to_run: String::new(),
            });
            count += 1;
        }
    }

    tasks.push(Task {
        name: format!("BonusTask{count}"),
        id: allocate_id(layout, store_config, &tasks)?,
        description: "This one has no completion time".to_string(),
        created_at,
        completed_at: None,
        important: false,
        command_to_run: String::new(),
    });

    Ok(tasks)
}

fn allocate_id(
    layout: &StoreLayout,
    store_config: &StoreConfig,
    tasks: &[Task],
) -> Result<TaskId, AppError> {
    match store_config.id_strategy {
        IdStrategy::Sequential => Ok(id::next_sequential(tasks)),
        IdStrategy::RandomWithLedger => id::next_random(layout, store_config.id_length),
    }
}

fn format_timestamp(at: OffsetDateTime) -> Result<String, AppError> {
    at.format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}
