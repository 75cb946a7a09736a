use crate::error::AppError;
use std::process::Command;

/// Result of one follow-up command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Seam for executing a task's follow-up shell command.
pub trait CommandRunner {
    fn run(&self, command: &str) -> Result<CommandOutput, AppError>;
}

/// Runs through the platform shell, capturing stdout and stderr together.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandOutput, AppError> {
        let output = shell_command(command)?
            .output()
            .map_err(|err| AppError::command_failed(err.to_string()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            code: output.status.code(),
            output: combined,
        })
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Result<Command, AppError> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    Ok(cmd)
}

#[cfg(windows)]
fn shell_command(command: &str) -> Result<Command, AppError> {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    Ok(cmd)
}

#[cfg(not(any(unix, windows)))]
fn shell_command(_command: &str) -> Result<Command, AppError> {
    Err(AppError::command_failed(
        "follow-up commands are not supported on this platform",
    ))
}

pub struct NoopRunner;

impl CommandRunner for NoopRunner {
    fn run(&self, _command: &str) -> Result<CommandOutput, AppError> {
        Ok(CommandOutput {
            code: Some(0),
            output: String::new(),
        })
    }
}

pub fn runner_from_env() -> Box<dyn CommandRunner> {
    if std::env::var("DOTODO_DISABLE_COMMANDS").is_ok() {
        return Box::new(NoopRunner);
    }

    Box::new(ShellRunner)
}
