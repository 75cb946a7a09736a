use clap::Parser;
use dotodo_cli::cli::{Cli, Command};
use dotodo_core::error::AppError;
use dotodo_core::id::IdStrategy;
use dotodo_core::model::Task;
use dotodo_core::storage::layout::{STORE_DIR_ENV_VAR, STORE_DIR_NAME};
use dotodo_core::task_api::{self, CompleteOutcome, InitOptions, ListFilter, NewTask};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Important")]
    important: bool,
    #[tabled(rename = "Status")]
    status: String,
}

fn format_created(created_at: &str) -> Result<String, AppError> {
    let parsed = OffsetDateTime::parse(created_at, &Rfc3339)
        .map_err(|_| AppError::invalid_data("created_on_at must be RFC3339"))?;
    let local = parsed.to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC));
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    local
        .format(&format)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

fn print_tasks_table(tasks: &[Task]) -> Result<(), AppError> {
    let mut rows = Vec::with_capacity(tasks.len());
    for task in tasks {
        rows.push(TaskRow {
            id: task.id.to_string(),
            name: task.name.clone(),
            created: format_created(&task.created_at)?,
            important: task.important,
            status: if task.is_completed() {
                "Done".to_string()
            } else {
                "Pending".to_string()
            },
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::ascii());
    println!("{table}");

    Ok(())
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let json = serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let json =
        serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_outcome_json(outcome: &CompleteOutcome) -> Result<(), AppError> {
    let task = serde_json::to_value(&outcome.task)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    let command = outcome.command.as_ref().map(|report| {
        serde_json::json!({
            "command": report.command,
            "output": report.output,
            "error": report.error.as_ref().map(|err| err.to_string()),
        })
    });
    println!("{}", serde_json::json!({ "task": task, "command": command }));
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|err| AppError::io(err.to_string()))?;

    let mut line = String::new();
    let bytes = io::stdin()
        .read_line(&mut line)
        .map_err(|err| AppError::io(err.to_string()))?;
    if bytes == 0 {
        return Err(AppError::invalid_input(
            "input ended before the task was described",
        ));
    }

    Ok(line.trim().to_string())
}

fn prompt_new_task() -> Result<NewTask, AppError> {
    let name = loop {
        let name = prompt_line("Enter task name (required): ")?;
        if !name.is_empty() {
            break name;
        }
        println!("Task name can't be empty.");
    };

    let description = prompt_line("Enter task description (optional): ")?;
    let important = prompt_line("Is this task important (y/N)? ")?.eq_ignore_ascii_case("y");
    let command_to_run = prompt_line("Command to run on completion (optional): ")?;

    Ok(NewTask {
        name,
        description,
        important,
        command_to_run,
    })
}

/// Ignore the store directory when the working directory is a git repo.
/// Skipped entirely when the store location is overridden by environment.
fn bootstrap_gitignore() -> Result<Option<String>, AppError> {
    if !Path::new(".git").is_dir() {
        return Ok(None);
    }

    let entry = format!("{STORE_DIR_NAME}/");
    let gitignore = Path::new(".gitignore");

    if gitignore.exists() {
        let content =
            std::fs::read_to_string(gitignore).map_err(|err| AppError::io(err.to_string()))?;
        if content.lines().any(|line| line.trim() == entry) {
            return Ok(None);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(gitignore)
            .map_err(|err| AppError::io(err.to_string()))?;
        writeln!(file, "{entry}").map_err(|err| AppError::io(err.to_string()))?;

        Ok(Some(format!("Added {entry} to .gitignore")))
    } else {
        std::fs::write(gitignore, format!("# Created by todo\n{entry}\n"))
            .map_err(|err| AppError::io(err.to_string()))?;

        Ok(Some("Created .gitignore".to_string()))
    }
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Init { example, random_ids } => {
            let id_strategy = if random_ids {
                IdStrategy::RandomWithLedger
            } else {
                IdStrategy::Sequential
            };

            let tasks = task_api::init_store(&InitOptions { example, id_strategy })?;
            if cli.json {
                print_tasks_json(&tasks)?;
            } else if tasks.is_empty() {
                println!("Initialized empty todo store");
            } else {
                println!("Initialized todo store with {} example tasks", tasks.len());
            }

            if std::env::var_os(STORE_DIR_ENV_VAR).is_none()
                && let Some(message) = bootstrap_gitignore()?
                && !cli.json
            {
                println!("{message}");
            }
        }
        Command::Add {
            name,
            description,
            important,
            command,
        } => {
            let new_task = match name {
                Some(name) => NewTask {
                    name,
                    description: description.unwrap_or_default(),
                    important,
                    command_to_run: command.unwrap_or_default(),
                },
                None => prompt_new_task()?,
            };

            let task = task_api::add_task(&new_task)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added task: {} ({})", task.name, task.id);
            }
        }
        Command::Ls {
            completed,
            uncompleted,
            important,
        } => {
            let tasks = task_api::list_tasks(ListFilter {
                completed,
                uncompleted,
                important,
            })?;

            if cli.json {
                print_tasks_json(&tasks)?;
            } else if tasks.is_empty() {
                println!("No tasks to show.");
            } else {
                print_tasks_table(&tasks)?;
            }
        }
        Command::Done { id } => {
            let outcome = task_api::complete_task(&id)?;
            if cli.json {
                print_outcome_json(&outcome)?;
            } else {
                println!("Completed task: {} ({})", outcome.task.name, outcome.task.id);
                if let Some(report) = &outcome.command {
                    println!("Ran command: {}", report.command);
                    if !report.output.is_empty() {
                        print!("{}", report.output);
                    }
                    if let Some(err) = &report.error {
                        eprintln!("WARNING: {err}");
                    }
                }
            }
        }
        Command::Rm => {
            task_api::remove_store()?;
            if cli.json {
                println!("{}", serde_json::json!({ "removed": true }));
            } else {
                println!("Removed todo store");
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        if matches!(err, AppError::StoreMissing(_)) {
            eprintln!("Run 'todo init' to create a store in this directory.");
        }
        std::process::exit(1);
    }
}
