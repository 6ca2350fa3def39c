// src/lib.rs

//! cmdkit — typed command composition.
//!
//! A [`Command`] is an executable unit of work producing a
//! [`CommandResult`]. Combinators compose commands into larger workflows
//! the way shell operators do, but as in-process objects:
//!
//! - [`PipeCommand`] chains commands like `|`, feeding each output to the
//!   next command's input and stopping at the first failure.
//! - [`SequentialCommand`] runs commands in order under an [`Operator`]
//!   (`&&`, `||`, `;`), sharing one input.
//! - [`ParallelCommand`] runs independent commands concurrently on a
//!   worker pool and gathers results in child order.
//!
//! Leaves include [`ProcessCommand`] (external OS processes) and
//! [`ListFilesCommand`] (filesystem traversal); any type implementing
//! [`Command`] composes the same way. Invocation goes through
//! [`run_command`] / [`async_run_command`], which normalize raised faults
//! into failed results so composites never see an escaped fault.

pub mod command;
pub mod compose;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod result;
pub mod types;

pub use command::{async_run_command, run_command, Command, CommandFuture};
pub use compose::{ParallelCommand, PipeCommand, SequentialCommand};
pub use errors::{CommandError, Result};
pub use exec::{find, run_lines, FindOptions, ProcessCommand};
pub use fs::{get_files, get_files_with, FileFilter, ListFilesCommand};
pub use result::CommandResult;
pub use types::Operator;
