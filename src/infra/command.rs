//! # Command Execution Module
//!
//! Runs the interpreter under test as a child process and captures its
//! exit code, stdout and stderr.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncReadExt;

use crate::core::config::ActiveTarget;
use crate::core::models::ProcessResult;

/// Spawns a command with an empty stdin and captures its output.
///
/// stdout and stderr are drained by two separate tasks while the child runs,
/// so a child that fills one pipe while the other is being read cannot block.
/// There is no timeout: a hung child hangs the caller.
pub async fn spawn_and_capture(mut cmd: tokio::process::Command) -> Result<ProcessResult> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .context("Failed to spawn process")?;

    let mut stdout = child
        .stdout
        .take()
        .context("Failed to capture stdout")?;
    let mut stderr = child
        .stderr
        .take()
        .context("Failed to capture stderr")?;

    let stdout_handle = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout.read_to_end(&mut buf).await?;
        Ok::<_, std::io::Error>(buf)
    });
    let stderr_handle = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await?;
        Ok::<_, std::io::Error>(buf)
    });

    let status = child.wait().await.context("Failed to get process status")?;

    let stdout = stdout_handle
        .await
        .context("Failed to join stdout task")?
        .context("Failed to read stdout")?;
    let stderr = stderr_handle
        .await
        .context("Failed to join stderr task")?
        .context("Failed to read stderr")?;

    Ok(ProcessResult {
        exit_code: status.code(),
        stdout,
        stderr,
    })
}

/// Invokes `target` on one test file as `program [args...] <file>`, with
/// `working_dir` as the child's current directory.
pub async fn invoke(target: &ActiveTarget, file: &str, working_dir: &Path) -> Result<ProcessResult> {
    let mut cmd = tokio::process::Command::new(&target.program);
    cmd.args(&target.args).arg(file).current_dir(working_dir);

    spawn_and_capture(cmd).await.with_context(|| {
        format!(
            "Failed to run target '{}' ({}) on {}",
            target.name,
            target.program.display(),
            file
        )
    })
}
