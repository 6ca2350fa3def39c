// src/fs/list.rs

//! Filesystem traversal: list files under a directory filtered by name
//! patterns.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::command::Command;
use crate::errors::Result;
use crate::fs::{FileFilter, FileSystem, RealFileSystem};
use crate::result::CommandResult;

/// Collect all files under `root` whose names pass `filter`.
///
/// A missing or non-directory `root` yields an empty list rather than an
/// error. Results are sorted lexicographically so the returned order is
/// deterministic.
pub fn get_files(
    root: impl AsRef<Path>,
    filter: &FileFilter,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    get_files_with(&RealFileSystem, root.as_ref(), filter, recursive)
}

/// [`get_files`] over an arbitrary [`FileSystem`] implementation.
pub fn get_files_with(
    fs: &dyn FileSystem,
    root: &Path,
    filter: &FileFilter,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    if !fs.is_dir(root) {
        debug!(root = %root.display(), "list root is not a directory");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                if recursive {
                    stack.push(path);
                }
            } else if fs.is_file(&path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if filter.matches(name) {
                        files.push(path);
                    }
                }
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Leaf command that lists files under a configured root.
///
/// `output` is an array of path strings; input is ignored. This is the
/// filesystem-walking collaborator expressed under the same [`Command`]
/// contract as every other leaf, so it composes with the combinators.
#[derive(Debug)]
pub struct ListFilesCommand {
    root: PathBuf,
    filter: FileFilter,
    recursive: bool,
}

impl ListFilesCommand {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: FileFilter::match_all(),
            recursive: true,
        }
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

impl Command for ListFilesCommand {
    fn run(&self, _input: Option<Value>) -> Result<CommandResult> {
        let files = get_files(&self.root, &self.filter, self.recursive)?;
        let paths = files
            .iter()
            .map(|path| Value::String(path.display().to_string()))
            .collect();
        Ok(CommandResult::ok(Value::Array(paths)))
    }
}
