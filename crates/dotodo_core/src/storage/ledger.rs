use crate::error::AppError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Create the ledger file if it is not there yet.
pub fn ensure_exists(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }
    std::fs::write(path, "").map_err(|err| AppError::io(err.to_string()))
}

pub fn contains(path: &Path, id: &str) -> Result<bool, AppError> {
    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    Ok(content.lines().any(|line| line.trim() == id))
}

/// Record one issued id, one per line. The ledger is append-only.
pub fn append(path: &Path, id: &str) -> Result<(), AppError> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|err| AppError::io(err.to_string()))?;
    writeln!(file, "{id}").map_err(|err| AppError::io(err.to_string()))
}

pub fn issued_ids(path: &Path) -> Result<Vec<String>, AppError> {
    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{append, contains, ensure_exists, issued_ids};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("dotodo-{nanos}-{file_name}"))
    }

    #[test]
    fn ensure_exists_creates_an_empty_ledger() {
        let path = temp_path("ids.txt");

        ensure_exists(&path).unwrap();
        let ids = issued_ids(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(ids.is_empty());
    }

    #[test]
    fn ensure_exists_keeps_an_existing_ledger() {
        let path = temp_path("existing-ids.txt");
        fs::write(&path, "Ab3$x9_k\n").unwrap();

        ensure_exists(&path).unwrap();
        let ids = issued_ids(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(ids, vec!["Ab3$x9_k".to_string()]);
    }

    #[test]
    fn append_then_contains() {
        let path = temp_path("append-ids.txt");
        ensure_exists(&path).unwrap();

        append(&path, "Ab3$x9_k").unwrap();
        append(&path, "7f!kQ20=").unwrap();

        assert!(contains(&path, "Ab3$x9_k").unwrap());
        assert!(contains(&path, "7f!kQ20=").unwrap());
        assert!(!contains(&path, "missing1").unwrap());

        let ids = issued_ids(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(ids.len(), 2);
    }
}
