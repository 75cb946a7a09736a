use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier. Sequential stores use integers, ledger stores use
/// fixed-length random strings; both serialize under the same `taskid` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Seq(u64),
    Rand(String),
}

impl TaskId {
    /// Compare against user input by rendered form, so an all-digit random
    /// identifier still resolves.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Self::Seq(n) => raw.parse::<u64>() == Ok(*n),
            Self::Rand(s) => s == raw,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seq(n) => write!(f, "{n}"),
            Self::Rand(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(rename = "taskid")]
    pub id: TaskId,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "created_on_at")]
    pub created_at: String,
    #[serde(rename = "completed_on_at", default)]
    pub completed_at: Option<String>,
    pub important: bool,
    #[serde(
        rename = "command_to_run",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub command_to_run: String,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskId};

    #[test]
    fn task_serializes_with_wire_field_names() {
        let task = Task {
            name: "demo".to_string(),
            id: TaskId::Seq(1),
            description: "a demo".to_string(),
            created_at: "2025-12-20T00:00:00Z".to_string(),
            completed_at: None,
            important: true,
            command_to_run: String::new(),
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&task).unwrap()).unwrap();

        assert_eq!(json["name"], "demo");
        assert_eq!(json["taskid"], 1);
        assert_eq!(json["description"], "a demo");
        assert_eq!(json["created_on_at"], "2025-12-20T00:00:00Z");
        assert!(json["completed_on_at"].is_null());
        assert_eq!(json["important"], true);
        assert!(json.get("command_to_run").is_none());
    }

    #[test]
    fn task_serializes_command_when_present() {
        let task = Task {
            name: "demo".to_string(),
            id: TaskId::Rand("Ab3$x9_k".to_string()),
            description: String::new(),
            created_at: "2025-12-20T00:00:00Z".to_string(),
            completed_at: Some("2025-12-21T00:00:00Z".to_string()),
            important: false,
            command_to_run: "echo hi".to_string(),
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&task).unwrap()).unwrap();

        assert_eq!(json["taskid"], "Ab3$x9_k");
        assert_eq!(json["completed_on_at"], "2025-12-21T00:00:00Z");
        assert_eq!(json["command_to_run"], "echo hi");
    }

    #[test]
    fn task_deserializes_without_optional_fields() {
        let content = "{\n  \"name\": \"demo\",\n  \"taskid\": 4,\n  \"created_on_at\": \"2025-12-20T00:00:00Z\",\n  \"important\": false\n}";

        let task: Task = serde_json::from_str(content).unwrap();

        assert_eq!(task.id, TaskId::Seq(4));
        assert!(task.description.is_empty());
        assert_eq!(task.completed_at, None);
        assert!(task.command_to_run.is_empty());
        assert!(!task.is_completed());
    }

    #[test]
    fn task_id_matches_rendered_form() {
        assert!(TaskId::Seq(7).matches("7"));
        assert!(!TaskId::Seq(7).matches("8"));
        assert!(TaskId::Rand("Ab3$x9_k".to_string()).matches("Ab3$x9_k"));
        assert!(TaskId::Rand("12345678".to_string()).matches("12345678"));
        assert!(!TaskId::Seq(12345678).matches("1234567"));
    }

    #[test]
    fn task_id_round_trips_both_variants() {
        let seq: TaskId = serde_json::from_str("7").unwrap();
        assert_eq!(seq, TaskId::Seq(7));

        let rand: TaskId = serde_json::from_str("\"7f!kQ20=\"").unwrap();
        assert_eq!(rand, TaskId::Rand("7f!kQ20=".to_string()));
    }
}
