use crate::error::AppError;
use crate::model::{Task, TaskId};
use crate::storage::layout::StoreLayout;
use crate::storage::ledger;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};

/// Identifier policy of a store, chosen once at init and persisted in its
/// config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Sequential,
    RandomWithLedger,
}

pub const DEFAULT_ID_LENGTH: usize = 8;

const CHAR_SET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-=";

/// Next sequential id: 1 + the highest integer id in the store. Recomputed
/// from the loaded collection on every call, never held in process state.
pub fn next_sequential(tasks: &[Task]) -> TaskId {
    let max = tasks
        .iter()
        .filter_map(|task| match task.id {
            TaskId::Seq(n) => Some(n),
            TaskId::Rand(_) => None,
        })
        .max()
        .unwrap_or(0);

    TaskId::Seq(max + 1)
}

/// Next random id: redraw while the candidate is already in the ledger,
/// then record the winner there before handing it out.
pub fn next_random(layout: &StoreLayout, length: usize) -> Result<TaskId, AppError> {
    let ids_file = layout.ids_file();
    ledger::ensure_exists(&ids_file)?;

    loop {
        let candidate = random_candidate(length);
        if ledger::contains(&ids_file, &candidate)? {
            continue;
        }

        ledger::append(&ids_file, &candidate)?;
        return Ok(TaskId::Rand(candidate));
    }
}

fn random_candidate(length: usize) -> String {
    let mut id = String::with_capacity(length);
    for _ in 0..length {
        id.push(CHAR_SET[uniform_index(CHAR_SET.len())] as char);
    }
    id
}

// Rejection sampling keeps the draw uniform over the alphabet. OsRng panics
// when the OS random source fails; there is no weaker fallback.
fn uniform_index(bound: usize) -> usize {
    let bound = bound as u32;
    let limit = u32::MAX - u32::MAX % bound;

    loop {
        let n = OsRng.next_u32();
        if n < limit {
            return (n % bound) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CHAR_SET, DEFAULT_ID_LENGTH, next_random, next_sequential, random_candidate};
    use crate::model::{Task, TaskId};
    use crate::storage::layout::StoreLayout;
    use crate::storage::ledger;
    use std::collections::HashSet;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_layout(name: &str) -> StoreLayout {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        StoreLayout::new(std::env::temp_dir().join(format!("dotodo-{nanos}-{name}")))
    }

    fn task_with_id(id: TaskId) -> Task {
        Task {
            name: "demo".to_string(),
            id,
            description: String::new(),
            created_at: "2025-12-20T00:00:00Z".to_string(),
            completed_at: None,
            important: false,
            command_to_run: String::new(),
        }
    }

    #[test]
    fn next_sequential_starts_at_one() {
        assert_eq!(next_sequential(&[]), TaskId::Seq(1));
    }

    #[test]
    fn next_sequential_is_one_past_the_maximum() {
        let tasks = vec![
            task_with_id(TaskId::Seq(2)),
            task_with_id(TaskId::Seq(7)),
            task_with_id(TaskId::Seq(4)),
        ];

        assert_eq!(next_sequential(&tasks), TaskId::Seq(8));
    }

    #[test]
    fn next_sequential_ignores_string_ids() {
        let tasks = vec![task_with_id(TaskId::Rand("99999999".to_string()))];

        assert_eq!(next_sequential(&tasks), TaskId::Seq(1));
    }

    #[test]
    fn random_candidate_draws_from_the_alphabet() {
        let candidate = random_candidate(DEFAULT_ID_LENGTH);

        assert_eq!(candidate.len(), DEFAULT_ID_LENGTH);
        assert!(candidate.bytes().all(|b| CHAR_SET.contains(&b)));
    }

    #[test]
    fn next_random_issues_distinct_ids_and_records_them() {
        let layout = temp_layout("random-ids");
        let mut issued = HashSet::new();

        for _ in 0..1000 {
            let id = next_random(&layout, DEFAULT_ID_LENGTH).unwrap();
            let rendered = id.to_string();
            assert_eq!(rendered.len(), DEFAULT_ID_LENGTH);
            assert!(issued.insert(rendered));
        }

        let recorded = ledger::issued_ids(&layout.ids_file()).unwrap();
        std::fs::remove_dir_all(layout.root()).ok();

        assert_eq!(recorded.len(), 1000);
        for id in recorded {
            assert!(issued.contains(&id));
        }
    }

    #[test]
    fn next_random_skips_ledgered_ids() {
        let layout = temp_layout("ledgered");
        ledger::ensure_exists(&layout.ids_file()).unwrap();
        ledger::append(&layout.ids_file(), "Ab3$x9_k").unwrap();

        let id = next_random(&layout, DEFAULT_ID_LENGTH).unwrap();
        let recorded = ledger::issued_ids(&layout.ids_file()).unwrap();
        std::fs::remove_dir_all(layout.root()).ok();

        assert_ne!(id.to_string(), "Ab3$x9_k");
        assert_eq!(recorded.len(), 2);
    }
}
