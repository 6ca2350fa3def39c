// src/exec/find.rs

//! Convenience wrappers: run a process for its output lines, and a
//! `find(1)` invocation builder. Unix-oriented helpers.

use std::path::Path;

use crate::command::Command;
use crate::errors::Result;
use crate::exec::process::ProcessCommand;

/// Run an argv-style command and return its stdout as trimmed, non-empty
/// lines.
///
/// This is a thin wrapper over [`ProcessCommand`] for one-shot use; for
/// pipes, sequences or custom options build the command directly. Faults
/// (non-zero exit, missing executable, ...) propagate as errors.
pub fn run_lines<I, S>(argv: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let result = ProcessCommand::new(argv)?.run(None)?;

    let lines = match result.output.as_str() {
        Some(text) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };
    Ok(lines)
}

/// Filters for [`find`].
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Object names to match; glob patterns, or regexes with `use_regex`.
    pub names: Vec<String>,
    /// Object names to exclude.
    pub exclude_names: Vec<String>,
    /// Object types to match (`f` file, `d` directory, `l` symlink, ...).
    pub types: Vec<String>,
    /// Match names with `-regex` instead of `-name`.
    pub use_regex: bool,
}

/// Search `directory` with the system `find` command.
///
/// Builds an argv of the shape
/// `find DIR ( -type f -o -type d ) -name A -o -name B ! ( -name C )`
/// and returns the matched paths as lines.
pub fn find(
    directory: impl AsRef<Path>,
    options: &FindOptions,
) -> Result<Vec<String>> {
    let name_flag = if options.use_regex { "-regex" } else { "-name" };

    let mut argv = vec![
        "find".to_string(),
        directory.as_ref().display().to_string(),
    ];

    if !options.types.is_empty() {
        argv.push("(".into());
        for (i, object_type) in options.types.iter().enumerate() {
            if i > 0 {
                argv.push("-o".into());
            }
            argv.push("-type".into());
            argv.push(object_type.clone());
        }
        argv.push(")".into());
    }

    for (i, name) in options.names.iter().enumerate() {
        if i > 0 {
            argv.push("-o".into());
        }
        argv.push(name_flag.into());
        argv.push(name.clone());
    }

    if !options.exclude_names.is_empty() {
        argv.push("!".into());
        argv.push("(".into());
        for (i, name) in options.exclude_names.iter().enumerate() {
            if i > 0 {
                argv.push("-o".into());
            }
            argv.push(name_flag.into());
            argv.push(name.clone());
        }
        argv.push(")".into());
    }

    run_lines(argv)
}
