//! Reusable leaf commands for exercising the combinators in tests.

use std::time::Duration;

use anyhow::anyhow;
use serde_json::Value;

use cmdkit::{Command, CommandResult, Result};

/// Appends a fixed token to its string input (empty string when no input
/// is given), so pipelines produce observable concatenations.
pub struct AppendCommand {
    token: String,
}

impl AppendCommand {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Command for AppendCommand {
    fn run(&self, input: Option<Value>) -> Result<CommandResult> {
        let base = match input {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        Ok(CommandResult::ok(Value::String(format!(
            "{base}{}",
            self.token
        ))))
    }
}

/// Fails softly: returns `succeeded = false` with a message, no fault.
pub struct FailCommand {
    message: String,
}

impl FailCommand {
    pub fn new() -> Self {
        Self {
            message: "failure from FailCommand".into(),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for FailCommand {
    fn run(&self, _input: Option<Value>) -> Result<CommandResult> {
        Ok(CommandResult::failure(&self.message))
    }
}

/// Raises a fault, exercising the runner's normalization boundary.
pub struct RaiseCommand {
    message: String,
}

impl RaiseCommand {
    pub fn new() -> Self {
        Self {
            message: "fault from RaiseCommand".into(),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for RaiseCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for RaiseCommand {
    fn run(&self, _input: Option<Value>) -> Result<CommandResult> {
        Err(anyhow!("{}", self.message).into())
    }
}

/// Sleeps for a fixed delay, then emits a fixed output. Lets parallel
/// tests force out-of-order completion.
pub struct SleepThenCommand {
    delay: Duration,
    output: Value,
}

impl SleepThenCommand {
    pub fn new(delay: Duration, output: Value) -> Self {
        Self { delay, output }
    }
}

impl Command for SleepThenCommand {
    fn run(&self, _input: Option<Value>) -> Result<CommandResult> {
        std::thread::sleep(self.delay);
        Ok(CommandResult::ok(self.output.clone()))
    }
}

/// Reports the identity of the thread it ran on, so tests can observe
/// where execution actually happened.
pub struct ThreadIdCommand;

impl Command for ThreadIdCommand {
    fn run(&self, _input: Option<Value>) -> Result<CommandResult> {
        let id = format!("{:?}", std::thread::current().id());
        Ok(CommandResult::ok(Value::String(id)))
    }
}
