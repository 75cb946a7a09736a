use crate::error::AppError;
use crate::model::Task;
use std::collections::HashSet;
use std::path::Path;

/// Read the whole store. A missing file is StoreMissing so callers can
/// suggest running init; anything unparseable is InvalidData.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    if !path.exists() {
        return Err(AppError::store_missing(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    let tasks: Vec<Task> =
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))?;

    let mut seen = HashSet::new();
    for task in &tasks {
        if !seen.insert(task.id.to_string()) {
            return Err(AppError::duplicate_id(format!(
                "id {} appears more than once",
                task.id
            )));
        }
    }

    Ok(tasks)
}

/// Full-file overwrite of the serialized array. Small single-user stores
/// only; there is no append path.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(tasks)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))
}
