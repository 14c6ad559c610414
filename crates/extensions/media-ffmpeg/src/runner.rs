//! External tool execution.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use director_protocols::MediaError;

/// Runs an external tool to completion.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run `program` with `args` and return its stdout. A non-zero exit is an error.
    async fn run(&self, program: &str, args: &[String]) -> Result<String, MediaError>;
}

/// Runs tools as child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, MediaError> {
        debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| MediaError::Spawn {
                tool: program.to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(MediaError::Failed {
                tool: program.to_string(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = SystemRunner
            .run("/nonexistent/ffmpeg", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Spawn { ref tool, .. } if tool == "/nonexistent/ffmpeg"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_carries_status_and_stderr() {
        let args = vec!["-c".to_string(), "echo bad input >&2; exit 2".to_string()];
        let err = SystemRunner.run("sh", &args).await.unwrap_err();
        match err {
            MediaError::Failed { status, stderr, .. } => {
                assert_eq!(status, 2);
                assert_eq!(stderr, "bad input");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdout_returned() {
        let args = vec!["-c".to_string(), "echo 12.5".to_string()];
        assert_eq!(SystemRunner.run("sh", &args).await.unwrap().trim(), "12.5");
    }
}
