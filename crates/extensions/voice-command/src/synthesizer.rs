//! [`Synthesizer`] that runs an external command.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use director_protocols::{SynthesisError, SynthesisRequest, Synthesizer};

/// Expand `{text}`, `{voice}` and `{output}` in every template argument.
///
/// Each argument is passed to the program as-is; no shell is involved.
pub fn expand_template(template: &[String], text: &str, voice: &str, output: &Path) -> Vec<String> {
    let output = output.display().to_string();
    template
        .iter()
        .map(|arg| {
            arg.replace("{text}", text)
                .replace("{voice}", voice)
                .replace("{output}", &output)
        })
        .collect()
}

/// Synthesizer that shells out through an argument template.
pub struct CommandSynthesizer {
    template: Vec<String>,
    timeout: Duration,
    extension: String,
}

impl CommandSynthesizer {
    /// `template[0]` is the program. The template must mention `{output}`.
    pub fn new(template: Vec<String>, timeout: Duration) -> Result<Self, SynthesisError> {
        if template.is_empty() {
            return Err(SynthesisError::Command("Empty command template".to_string()));
        }
        if !template.iter().any(|arg| arg.contains("{output}")) {
            return Err(SynthesisError::Command(
                "Command template has no {output} placeholder".to_string(),
            ));
        }
        Ok(Self {
            template,
            timeout,
            extension: "mp3".to_string(),
        })
    }

    /// Extension of the files the command writes.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

#[async_trait]
impl Synthesizer for CommandSynthesizer {
    fn id(&self) -> &str {
        "command"
    }

    fn extension(&self) -> &str {
        &self.extension
    }

    async fn synthesize(
        &self,
        request: &SynthesisRequest,
        output: &Path,
    ) -> Result<(), SynthesisError> {
        let args = expand_template(&self.template, &request.text, &request.voice, output);
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| SynthesisError::Command("Empty command template".to_string()))?;

        debug!("Running synthesis command: {}", program);

        let mut cmd = Command::new(program);
        cmd.args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                SynthesisError::Command(format!(
                    "{} timed out after {}s",
                    program,
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| SynthesisError::Command(format!("{}: {}", program, e)))?;

        if !result.status.success() {
            let code = result.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(SynthesisError::Command(format!(
                "{} exited with code {}: {}",
                program,
                code,
                stderr.trim()
            )));
        }

        let size = tokio::fs::metadata(output).await.map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(SynthesisError::EmptyAudio(request.text.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod tests;
