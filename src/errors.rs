use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, storage, and configuration layers.
#[derive(Error, Debug)]
pub enum BookkeepingError {
    #[error("Company not found: {0}")]
    CompanyNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, BookkeepingError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BookkeepingError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Unknown command `{name}`{}", suggestion_suffix(.suggestion))]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(candidate) => format!(" (did you mean `{candidate}`?)"),
        None => String::new(),
    }
}

impl From<std::io::Error> for BookkeepingError {
    fn from(err: std::io::Error) -> Self {
        BookkeepingError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BookkeepingError {
    fn from(err: serde_json::Error) -> Self {
        BookkeepingError::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_mentions_suggestion() {
        let err = CliError::UnknownCommand {
            name: "lst".into(),
            suggestion: Some("list".into()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown command `lst` (did you mean `list`?)"
        );
    }

    #[test]
    fn io_errors_become_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = BookkeepingError::from(io);
        assert!(matches!(err, BookkeepingError::StorageError(ref msg) if msg.contains("missing")));
    }
}
