//! Background audio playback through an external player.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use director_protocols::{AudioPlayback, MediaError, PlaybackHandle};

/// Plays audio with a command such as `ffplay -nodisp -autoexit`.
pub struct CommandPlayback {
    argv: Vec<String>,
}

impl CommandPlayback {
    /// `argv[0]` is the player; the audio path is appended.
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }
}

#[async_trait]
impl AudioPlayback for CommandPlayback {
    async fn start(&self, path: &Path) -> Result<Box<dyn PlaybackHandle>, MediaError> {
        let (program, args) = self.argv.split_first().ok_or_else(|| MediaError::Spawn {
            tool: "player".to_string(),
            message: "Empty player command".to_string(),
        })?;

        let child = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MediaError::Spawn {
                tool: program.clone(),
                message: e.to_string(),
            })?;

        info!("Playing {} with {} (PID {:?})", path.display(), program, child.id());
        Ok(Box::new(ProcessHandle { child: Some(child) }))
    }
}

/// A running player process; killed on stop or drop.
pub struct ProcessHandle {
    child: Option<Child>,
}

impl PlaybackHandle for ProcessHandle {
    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                debug!("Player already exited: {}", e);
            }
        }
    }
}
