// src/result.rs

//! The result record produced by every command execution.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::CommandError;

/// Outcome of exactly one execution of exactly one command.
///
/// Constructed once per execution attempt and never mutated afterwards.
/// `succeeded` is the single source of truth for success or failure:
/// a command may fail "softly" by returning `succeeded = false` with an
/// `error_message` and no `error`, while caught faults populate both.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The domain value produced; `Value::Null` on failure.
    pub output: Value,
    /// Whether the execution succeeded.
    pub succeeded: bool,
    /// The underlying fault, if one was raised and caught by the runner.
    pub error: Option<Arc<CommandError>>,
    /// Human-readable description, set whenever `succeeded` is false.
    pub error_message: Option<String>,
    /// Free-form side-channel data (exit code, captured stderr, ...).
    pub metadata: Value,
    /// Ordered child results for composite commands, gated by their
    /// collect flag. Empty for leaf commands.
    pub results: Vec<CommandResult>,
}

impl Default for CommandResult {
    fn default() -> Self {
        Self {
            output: Value::Null,
            succeeded: true,
            error: None,
            error_message: None,
            metadata: Value::Null,
            results: Vec::new(),
        }
    }
}

impl CommandResult {
    /// A successful result carrying `output`.
    pub fn ok(output: Value) -> Self {
        Self {
            output,
            ..Self::default()
        }
    }

    /// A soft failure: no fault was raised, only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// A failure produced from a caught fault. Used by the runner.
    pub fn from_error(error: CommandError) -> Self {
        Self {
            succeeded: false,
            error_message: Some(error.to_string()),
            error: Some(Arc::new(error)),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_results(mut self, results: Vec<CommandResult>) -> Self {
        self.results = results;
        self
    }

    /// True if this failure was a process exceeding its deadline.
    pub fn timed_out(&self) -> bool {
        matches!(self.error.as_deref(), Some(CommandError::Timeout(_)))
    }

    /// True if this failure was a missing executable.
    pub fn command_not_found(&self) -> bool {
        matches!(
            self.error.as_deref(),
            Some(CommandError::CommandNotFound(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn default_is_empty_success() {
        let res = CommandResult::default();
        assert!(res.succeeded);
        assert_eq!(res.output, Value::Null);
        assert!(res.error.is_none());
        assert!(res.error_message.is_none());
        assert!(res.results.is_empty());
    }

    #[test]
    fn failure_sets_message_without_error() {
        let res = CommandResult::failure("nope");
        assert!(!res.succeeded);
        assert_eq!(res.error_message.as_deref(), Some("nope"));
        assert!(res.error.is_none());
        assert_eq!(res.output, Value::Null);
    }

    #[test]
    fn from_error_populates_both_channels() {
        let res = CommandResult::from_error(CommandError::Timeout(
            Duration::from_secs(1),
        ));
        assert!(!res.succeeded);
        assert!(res.timed_out());
        assert!(!res.command_not_found());
        assert!(res.error_message.unwrap().contains("timed out"));
    }

    #[test]
    fn builder_style_extras() {
        let res = CommandResult::ok(json!("x"))
            .with_metadata(json!({"exit_code": 0}))
            .with_results(vec![CommandResult::ok(json!("x"))]);
        assert_eq!(res.metadata["exit_code"], 0);
        assert_eq!(res.results.len(), 1);
    }
}
