//! Shell command backend.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{CoreError, CoreResult};

/// Runs the command line a shell rule dispatches to.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Invoke `command` with `arg` appended as one quoted token.
    ///
    /// # Errors
    /// Spawn failure and non-zero exit are both errors.
    async fn run(&self, command: &str, arg: &str) -> CoreResult<()>;
}

/// Production runner invoking `sh -c`.
///
/// The rendered argument is appended as a single double-quoted token; this
/// quoting is a compatibility contract with existing configured rules.
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, arg: &str) -> CoreResult<()> {
        let command_line = format!("{command} \"{arg}\"");

        let output = Command::new("sh")
            .arg("-c")
            .arg(&command_line)
            .output()
            .await
            .map_err(|e| CoreError::CommandFailed(format!("spawn '{command_line}': {e}")))?;

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );

        if !output.status.success() {
            return Err(CoreError::CommandFailed(format!(
                "'{command_line}' exited with {}: {}",
                output.status,
                combined.trim_end()
            )));
        }

        log::debug!("exec '{command_line}': {}", combined.trim_end());
        Ok(())
    }
}
