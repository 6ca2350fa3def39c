// src/compose/parallel.rs

//! Parallel composition across isolated worker threads.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use serde_json::Value;
use tracing::debug;

use crate::command::{run_command, Command, CommandFuture};
use crate::errors::{CommandError, Result};
use crate::result::CommandResult;

/// Runs independent children concurrently on a fixed-size pool of worker
/// threads and gathers one result per child, in child order.
///
/// The children share no state: each worker claims the next unclaimed
/// child index and invokes the runner with no input. The scope join is
/// the only synchronization point; no partial results are observable
/// before every child has completed.
///
/// The aggregate `succeeded` is always true — it reflects that the batch
/// mechanism ran, not that every child succeeded. Inspect `results` (or
/// [`ParallelCommand::child_result`]) for per-child outcomes.
///
/// The async path is not supported: thread-pool parallelism and
/// cooperative suspension are mutually exclusive execution models, so
/// `async_run` fails with [`CommandError::UnsupportedOperation`].
pub struct ParallelCommand {
    commands: Vec<Box<dyn Command>>,
    pool_size: usize,
    collect_results: bool,
    /// Per-child results copied back after the pool joins, so callers
    /// inspecting a child's slot see state consistent with the aggregate.
    reconciled: Vec<Mutex<Option<CommandResult>>>,
}

impl ParallelCommand {
    /// Create a parallel batch over `commands`.
    ///
    /// The pool size defaults to the available hardware concurrency.
    /// Fails with [`CommandError::InvalidArgument`] if `commands` is empty.
    pub fn new(commands: Vec<Box<dyn Command>>) -> Result<Self> {
        if commands.is_empty() {
            return Err(CommandError::InvalidArgument(
                "commands list cannot be empty".into(),
            ));
        }
        let reconciled = commands.iter().map(|_| Mutex::new(None)).collect();
        Ok(Self {
            commands,
            pool_size: num_cpus::get(),
            collect_results: true,
            reconciled,
        })
    }

    /// Set the number of worker threads.
    ///
    /// Fails with [`CommandError::InvalidArgument`] if `size` is zero.
    pub fn with_pool_size(mut self, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(CommandError::InvalidArgument(
                "pool size must be at least 1".into(),
            ));
        }
        self.pool_size = size;
        Ok(self)
    }

    /// Control whether child outputs and results are retained in the
    /// aggregate result. Reconciled per-child slots are filled either way.
    pub fn with_collect_results(mut self, collect: bool) -> Self {
        self.collect_results = collect;
        self
    }

    /// The reconciled result of the child at `index` from the most recent
    /// run, if any.
    pub fn child_result(&self, index: usize) -> Option<CommandResult> {
        self.reconciled
            .get(index)
            .and_then(|slot| slot.lock().expect("result slot poisoned").clone())
    }

    /// Reconciled results for all children, in child order.
    pub fn child_results(&self) -> Vec<Option<CommandResult>> {
        self.reconciled
            .iter()
            .map(|slot| slot.lock().expect("result slot poisoned").clone())
            .collect()
    }

    /// Dispatch every child to the worker pool and gather results in
    /// child order, regardless of completion order.
    fn run_pool(&self) -> Vec<CommandResult> {
        let total = self.commands.len();
        let workers = self.pool_size.min(total);
        let next = AtomicUsize::new(0);
        let gathered: Vec<Mutex<Option<CommandResult>>> =
            self.commands.iter().map(|_| Mutex::new(None)).collect();

        debug!(children = total, workers, "dispatching parallel batch");

        thread::scope(|scope| {
            for _ in 0..workers {
                let next = &next;
                let gathered = &gathered;
                scope.spawn(move || loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index >= total {
                        break;
                    }
                    let result =
                        run_command(self.commands[index].as_ref(), None);
                    *gathered[index].lock().expect("result slot poisoned") =
                        Some(result);
                });
            }
        });

        gathered
            .into_iter()
            .map(|slot| {
                slot.into_inner()
                    .expect("result slot poisoned")
                    .expect("every child produced a result")
            })
            .collect()
    }
}

impl fmt::Debug for ParallelCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelCommand")
            .field("commands", &self.commands.len())
            .field("pool_size", &self.pool_size)
            .field("collect_results", &self.collect_results)
            .finish_non_exhaustive()
    }
}

impl Command for ParallelCommand {
    fn run(&self, input: Option<Value>) -> Result<CommandResult> {
        if input.is_some() {
            return Err(CommandError::InvalidArgument(
                "parallel commands are independent and do not take input"
                    .into(),
            ));
        }

        let results = self.run_pool();

        // Copy each result back onto the corresponding child slot before
        // returning, so per-child state matches the aggregate.
        for (slot, result) in self.reconciled.iter().zip(&results) {
            *slot.lock().expect("result slot poisoned") = Some(result.clone());
        }

        let output = if self.collect_results {
            Value::Array(results.iter().map(|r| r.output.clone()).collect())
        } else {
            Value::Null
        };
        let results = if self.collect_results {
            results
        } else {
            Vec::new()
        };

        Ok(CommandResult {
            output,
            results,
            ..CommandResult::default()
        })
    }

    fn async_run<'a>(&'a self, _input: Option<Value>) -> CommandFuture<'a> {
        Box::pin(async {
            Err(CommandError::UnsupportedOperation(
                "parallel commands cannot run on the async path".into(),
            ))
        })
    }
}
