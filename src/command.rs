// src/command.rs

//! The `Command` contract and the runner functions that invoke it.
//!
//! Every leaf and composite implements [`Command`]. Callers go through
//! [`run_command`] / [`async_run_command`], which form the single fault
//! boundary of the crate: an `Err` returned by a command is converted into
//! a failed [`CommandResult`] right there. Composites invoke their
//! children through the same runners, so they never need fault handling
//! of their own.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::result::CommandResult;

/// Boxed future returned by the asynchronous execution path.
///
/// Keeps the trait object-safe while staying generic over borrow
/// lifetimes, so `Box<dyn Command>` children can be awaited.
pub type CommandFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>>;

/// An executable unit of work.
///
/// Input is passed as an explicit per-call argument and results are
/// returned by value; implementations hold configuration only, which
/// makes them reusable and shareable across concurrent invocations.
///
/// Returning `Err` is the "raised fault" channel. It is caught by the
/// runners and normalized into a failed [`CommandResult`]; commands that
/// merely did not succeed should instead return
/// [`CommandResult::failure`].
pub trait Command: Send + Sync {
    /// Run the command synchronously.
    fn run(&self, input: Option<Value>) -> Result<CommandResult>;

    /// Run the command on the cooperative (async) path.
    ///
    /// The default implementation delegates to [`Command::run`], which is
    /// correct for any command that does not suspend.
    fn async_run<'a>(&'a self, input: Option<Value>) -> CommandFuture<'a> {
        Box::pin(async move { self.run(input) })
    }
}

/// Run a command synchronously, normalizing any raised fault into a
/// failed [`CommandResult`].
pub fn run_command(command: &dyn Command, input: Option<Value>) -> CommandResult {
    match command.run(input) {
        Ok(result) => result,
        Err(err) => {
            debug!(error = %err, "command raised a fault; normalizing");
            CommandResult::from_error(err)
        }
    }
}

/// Async counterpart of [`run_command`] with identical semantics.
pub async fn async_run_command(
    command: &dyn Command,
    input: Option<Value>,
) -> CommandResult {
    match command.async_run(input).await {
        Ok(result) => result,
        Err(err) => {
            debug!(error = %err, "command raised a fault; normalizing");
            CommandResult::from_error(err)
        }
    }
}
