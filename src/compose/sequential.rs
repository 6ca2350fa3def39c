// src/compose/sequential.rs

//! Sequential composition under a shell-style control operator.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::command::{
    async_run_command, run_command, Command, CommandFuture,
};
use crate::errors::{CommandError, Result};
use crate::result::CommandResult;
use crate::types::Operator;

/// Runs its children in order under an [`Operator`], like `&&`, `||` and
/// `;` in a shell.
///
/// Unlike [`PipeCommand`](crate::compose::PipeCommand), every child
/// receives a clone of the same input: the children are independent steps
/// sharing one input, not a data pipeline.
///
/// The final `output` is the ordered list of collected child outputs (or
/// the singleton list of the last child's output when collection is
/// disabled). The aggregate `succeeded` is the last executed child's
/// flag, except under [`Operator::Always`] where it is forced to true.
pub struct SequentialCommand {
    commands: Vec<Box<dyn Command>>,
    operator: Operator,
    collect_results: bool,
}

impl SequentialCommand {
    /// Create a sequence over `commands` joined by `operator`.
    ///
    /// Fails with [`CommandError::InvalidArgument`] if `commands` is empty.
    pub fn new(
        commands: Vec<Box<dyn Command>>,
        operator: Operator,
    ) -> Result<Self> {
        if commands.is_empty() {
            return Err(CommandError::InvalidArgument(
                "commands list cannot be empty".into(),
            ));
        }
        Ok(Self {
            commands,
            operator,
            collect_results: true,
        })
    }

    /// Control whether per-child results (and their outputs) are retained.
    pub fn with_collect_results(mut self, collect: bool) -> Self {
        self.collect_results = collect;
        self
    }

    /// Whether execution should continue after observing `result`.
    fn should_continue(&self, result: &CommandResult) -> bool {
        match self.operator {
            Operator::And => result.succeeded,
            Operator::Or => !result.succeeded,
            Operator::Always => true,
        }
    }

    fn finalize(
        &self,
        last: CommandResult,
        outputs: Vec<Value>,
        collected: Vec<CommandResult>,
    ) -> CommandResult {
        let output = if self.collect_results {
            Value::Array(outputs)
        } else {
            Value::Array(vec![last.output])
        };

        let succeeded = match self.operator {
            Operator::Always => true,
            _ => last.succeeded,
        };

        CommandResult {
            output,
            succeeded,
            error: last.error,
            error_message: last.error_message,
            metadata: Value::Null,
            results: collected,
        }
    }
}

impl fmt::Debug for SequentialCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialCommand")
            .field("commands", &self.commands.len())
            .field("operator", &self.operator)
            .field("collect_results", &self.collect_results)
            .finish_non_exhaustive()
    }
}

impl Command for SequentialCommand {
    fn run(&self, input: Option<Value>) -> Result<CommandResult> {
        let mut outputs = Vec::new();
        let mut collected = Vec::new();
        let mut last: Option<CommandResult> = None;

        for (index, command) in self.commands.iter().enumerate() {
            let result = run_command(command.as_ref(), input.clone());

            if self.collect_results {
                outputs.push(result.output.clone());
                collected.push(result.clone());
            }
            let proceed = self.should_continue(&result);
            last = Some(result);

            if !proceed {
                debug!(
                    step = index,
                    operator = %self.operator,
                    "sequence short-circuited"
                );
                break;
            }
        }

        // The child list is validated non-empty at construction.
        let last = last.expect("sequence ran at least one command");
        Ok(self.finalize(last, outputs, collected))
    }

    fn async_run<'a>(&'a self, input: Option<Value>) -> CommandFuture<'a> {
        Box::pin(async move {
            let mut outputs = Vec::new();
            let mut collected = Vec::new();
            let mut last: Option<CommandResult> = None;

            for (index, command) in self.commands.iter().enumerate() {
                let result =
                    async_run_command(command.as_ref(), input.clone()).await;

                if self.collect_results {
                    outputs.push(result.output.clone());
                    collected.push(result.clone());
                }
                let proceed = self.should_continue(&result);
                last = Some(result);

                if !proceed {
                    debug!(
                        step = index,
                        operator = %self.operator,
                        "sequence short-circuited"
                    );
                    break;
                }
            }

            let last = last.expect("sequence ran at least one command");
            Ok(self.finalize(last, outputs, collected))
        })
    }
}
