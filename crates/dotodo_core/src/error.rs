use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    StoreMissing(String),
    InvalidData(String),
    DuplicateId(String),
    TaskNotFound(String),
    AlreadyCompleted(String),
    CommandFailed(String),
    InvalidInput(String),
    Io(String),
}

impl AppError {
    pub fn store_missing<M: Into<String>>(message: M) -> Self {
        Self::StoreMissing(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn duplicate_id<M: Into<String>>(message: M) -> Self {
        Self::DuplicateId(message.into())
    }

    pub fn task_not_found<M: Into<String>>(message: M) -> Self {
        Self::TaskNotFound(message.into())
    }

    pub fn already_completed<M: Into<String>>(message: M) -> Self {
        Self::AlreadyCompleted(message.into())
    }

    pub fn command_failed<M: Into<String>>(message: M) -> Self {
        Self::CommandFailed(message.into())
    }

    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreMissing(_) => "store_missing",
            Self::InvalidData(_) => "invalid_data",
            Self::DuplicateId(_) => "duplicate_id",
            Self::TaskNotFound(_) => "task_not_found",
            Self::AlreadyCompleted(_) => "already_completed",
            Self::CommandFailed(_) => "command_failed",
            Self::InvalidInput(_) => "invalid_input",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::StoreMissing(message) => message,
            Self::InvalidData(message) => message,
            Self::DuplicateId(message) => message,
            Self::TaskNotFound(message) => message,
            Self::AlreadyCompleted(message) => message,
            Self::CommandFailed(message) => message,
            Self::InvalidInput(message) => message,
            Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
