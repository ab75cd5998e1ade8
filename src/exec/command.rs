// src/exec/command.rs

//! External process runner.

use std::fmt;
use std::path::Path;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::errors::Result;

/// A program plus its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-like rendering for log lines and dry runs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(word: &str) -> String {
    if !word.is_empty() && !word.contains(|c: char| c.is_whitespace() || c == '"') {
        word.to_string()
    } else {
        format!("\"{}\"", word.replace('"', "\\\""))
    }
}

/// How an external command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// Non-zero exit; `-1` when killed by a signal.
    Failed(i32),
}

/// Run `spec` in `cwd`, letting its stdout through and relaying stderr
/// line by line as warnings.
pub async fn run_command(spec: &CommandSpec, cwd: &Path) -> Result<CommandOutcome> {
    info!(cmd = %spec, ?cwd, "starting process");

    let mut child = Command::new(&spec.program)
        .args(&spec.args)
        .current_dir(cwd)
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning `{}`", spec.program))?;

    let stderr_task = child.stderr.take().map(|stderr| {
        let program = spec.program.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                warn!(program = %program, "{}", line);
            }
        })
    });

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for `{}`", spec.program))?;

    if let Some(task) = stderr_task {
        if let Err(e) = task.await {
            warn!(program = %spec.program, error = %e, "stderr relay task failed");
        }
    }

    let code = status.code().unwrap_or(-1);
    info!(
        cmd = %spec.program,
        exit_code = code,
        success = status.success(),
        "process exited"
    );

    Ok(if status.success() {
        CommandOutcome::Success
    } else {
        CommandOutcome::Failed(code)
    })
}
