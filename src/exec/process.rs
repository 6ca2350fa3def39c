// src/exec/process.rs

//! Leaf command wrapping one external OS process.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::command::{Command, CommandFuture};
use crate::errors::{CommandError, Result};
use crate::result::CommandResult;

/// Runs an external program, captures its stdout/stderr and exit code,
/// and optionally enforces a deadline.
///
/// The captured stdout is the result's `output`; `metadata` carries
/// `exit_code`, `stdout` and `stderr`. Input handed to [`Command::run`]
/// (for example by a pipeline stage) is written to the child's stdin.
///
/// With `check` enabled (the default) a non-zero exit raises
/// [`CommandError::ProcessFailed`], which the runner normalizes into a
/// failed result; with `check` disabled the result is reported as
/// succeeded and the exit code is only visible in the metadata. A missing
/// executable raises [`CommandError::CommandNotFound`] and an exceeded
/// deadline raises [`CommandError::Timeout`] — both are exposed as named
/// flags on the normalized result
/// ([`CommandResult::command_not_found`], [`CommandResult::timed_out`]).
#[derive(Debug)]
pub struct ProcessCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    inherit_env: bool,
    timeout: Option<Duration>,
    check: bool,
}

impl ProcessCommand {
    /// Create a process command from an argv-style sequence.
    ///
    /// Fails with [`CommandError::InvalidArgument`] if `argv` is empty.
    pub fn new<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().ok_or_else(|| {
            CommandError::InvalidArgument("argv cannot be empty".into())
        })?;
        Ok(Self {
            program,
            args: argv.collect(),
            cwd: None,
            env: Vec::new(),
            inherit_env: true,
            timeout: None,
            check: true,
        })
    }

    /// Working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable for the child process.
    pub fn env(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Whether the child inherits the parent environment (default true).
    /// When disabled, the child sees only variables added via [`env`].
    ///
    /// [`env`]: ProcessCommand::env
    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    /// Kill the process and fail with [`CommandError::Timeout`] if it
    /// does not exit within `limit`.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Whether a non-zero exit raises a fault (default true).
    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    async fn execute(&self, input: Option<Value>) -> Result<CommandResult> {
        let mut cmd = TokioCommand::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        if !self.inherit_env {
            cmd.env_clear();
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        cmd.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(cmd = %self.display(), "spawning process");

        let mut child = cmd.spawn().map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                CommandError::CommandNotFound(self.program.clone())
            } else {
                CommandError::Io(err)
            }
        })?;

        if let Some(value) = input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(value_to_text(&value).as_bytes()).await?;
            }
        }

        // On timeout the in-flight wait future is dropped, which kills
        // the child via kill_on_drop.
        let output = match self.timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, child.wait_with_output())
                    .await
                {
                    Ok(waited) => waited?,
                    Err(_) => return Err(CommandError::Timeout(limit)),
                }
            }
            None => child.wait_with_output().await?,
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let code = output.status.code().unwrap_or(-1);

        debug!(
            cmd = %self.display(),
            exit_code = code,
            success = output.status.success(),
            "process exited"
        );

        if self.check && !output.status.success() {
            return Err(CommandError::ProcessFailed { code, stderr });
        }

        let metadata = json!({
            "exit_code": code,
            "stdout": stdout.clone(),
            "stderr": stderr,
        });
        Ok(CommandResult::ok(Value::String(stdout)).with_metadata(metadata))
    }
}

impl Command for ProcessCommand {
    /// Synchronous execution drives the async implementation on a
    /// throwaway current-thread runtime. Must not be called from inside
    /// an async context; use [`Command::async_run`] there.
    fn run(&self, input: Option<Value>) -> Result<CommandResult> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.execute(input))
    }

    fn async_run<'a>(&'a self, input: Option<Value>) -> CommandFuture<'a> {
        Box::pin(self.execute(input))
    }
}

/// Text form of a value fed to a child's stdin.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
