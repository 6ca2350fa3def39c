// src/compose/pipe.rs

//! Pipeline composition: each child's output feeds the next child's input.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::command::{
    async_run_command, run_command, Command, CommandFuture,
};
use crate::errors::{CommandError, Result};
use crate::result::CommandResult;

/// Runs its children in order, feeding each result's `output` to the next
/// child as input, like `|` in a shell. Stops at the first failing child.
///
/// The final result carries the last executed child's output, success
/// flag and error details. With result collection enabled (the default),
/// `results` holds one entry per executed child in execution order.
pub struct PipeCommand {
    commands: Vec<Box<dyn Command>>,
    collect_results: bool,
}

impl PipeCommand {
    /// Create a pipeline over `commands`.
    ///
    /// Fails with [`CommandError::InvalidArgument`] if `commands` is empty.
    pub fn new(commands: Vec<Box<dyn Command>>) -> Result<Self> {
        if commands.is_empty() {
            return Err(CommandError::InvalidArgument(
                "commands list cannot be empty".into(),
            ));
        }
        Ok(Self {
            commands,
            collect_results: true,
        })
    }

    /// Control whether per-child results are retained in the final
    /// result's `results` field.
    pub fn with_collect_results(mut self, collect: bool) -> Self {
        self.collect_results = collect;
        self
    }

    fn finalize(
        &self,
        last: CommandResult,
        collected: Vec<CommandResult>,
    ) -> CommandResult {
        CommandResult {
            output: last.output,
            succeeded: last.succeeded,
            error: last.error,
            error_message: last.error_message,
            metadata: Value::Null,
            results: collected,
        }
    }
}

impl fmt::Debug for PipeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipeCommand")
            .field("commands", &self.commands.len())
            .field("collect_results", &self.collect_results)
            .finish_non_exhaustive()
    }
}

impl Command for PipeCommand {
    fn run(&self, input: Option<Value>) -> Result<CommandResult> {
        let mut current_input = input;
        let mut collected = Vec::new();
        let mut last: Option<CommandResult> = None;

        for (index, command) in self.commands.iter().enumerate() {
            let result = run_command(command.as_ref(), current_input.take());
            current_input = Some(result.output.clone());

            let failed = !result.succeeded;
            if self.collect_results {
                collected.push(result.clone());
            }
            last = Some(result);

            if failed {
                debug!(stage = index, "pipeline stage failed; stopping");
                break;
            }
        }

        // The child list is validated non-empty at construction.
        let last = last.expect("pipeline ran at least one command");
        Ok(self.finalize(last, collected))
    }

    fn async_run<'a>(&'a self, input: Option<Value>) -> CommandFuture<'a> {
        Box::pin(async move {
            let mut current_input = input;
            let mut collected = Vec::new();
            let mut last: Option<CommandResult> = None;

            for (index, command) in self.commands.iter().enumerate() {
                let result =
                    async_run_command(command.as_ref(), current_input.take())
                        .await;
                current_input = Some(result.output.clone());

                let failed = !result.succeeded;
                if self.collect_results {
                    collected.push(result.clone());
                }
                last = Some(result);

                if failed {
                    debug!(stage = index, "pipeline stage failed; stopping");
                    break;
                }
            }

            let last = last.expect("pipeline ran at least one command");
            Ok(self.finalize(last, collected))
        })
    }
}
