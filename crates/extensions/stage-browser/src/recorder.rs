//! Screencast capture of the recorded tab.
//!
//! Frames arrive as `Page.screencastFrame` events with a wall-clock timestamp.
//! They are written as numbered JPEGs and described by an ffconcat manifest
//! whose per-frame durations reproduce the original timing.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cdp::{CdpError, CdpResponse, PageSession, ScreencastFormat, ScreencastFrame};

/// Capture settings.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Directory receiving the frames.
    pub dir: PathBuf,
    /// JPEG quality, 0-100.
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
}

/// One saved frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedFrame {
    pub path: PathBuf,
    /// Seconds since the UNIX epoch.
    pub timestamp: f64,
}

/// Frames of a finished capture.
#[derive(Debug, Clone)]
pub struct Capture {
    pub frames: Vec<CapturedFrame>,
    /// Wall-clock time capture stopped, seconds since the UNIX epoch.
    pub stopped_at: f64,
}

impl Capture {
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<f64> {
        self.frames.first().map(|f| f.timestamp)
    }

    /// Seconds of footage before `wall_zero`, the live run's start.
    pub fn lead_in(&self, wall_zero: SystemTime) -> f64 {
        self.first_timestamp()
            .map(|first| lead_in(epoch_secs(wall_zero), first))
            .unwrap_or(0.0)
    }

    /// ffconcat manifest covering the capture up to `stopped_at`.
    pub fn manifest(&self) -> String {
        concat_manifest(&self.frames, self.stopped_at)
    }

    /// Write the manifest next to the frames and return its path.
    pub async fn write_manifest(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join("frames.ffconcat");
        tokio::fs::write(&path, self.manifest()).await?;
        Ok(path)
    }
}

/// Offset of `wall_zero` into footage that starts at `first_frame`; never negative.
pub fn lead_in(wall_zero: f64, first_frame: f64) -> f64 {
    (wall_zero - first_frame).max(0.0)
}

/// ffconcat script for `frames`, the last one held until `until`.
pub fn concat_manifest(frames: &[CapturedFrame], until: f64) -> String {
    let mut out = String::from("ffconcat version 1.0\n");
    for (i, frame) in frames.iter().enumerate() {
        let end = frames.get(i + 1).map(|next| next.timestamp).unwrap_or(until);
        let duration = (end - frame.timestamp).max(0.001);
        let _ = writeln!(out, "file '{}'", escape_path(&frame.path));
        let _ = writeln!(out, "duration {:.6}", duration);
    }
    // The concat demuxer ignores the final duration unless the file is repeated.
    if let Some(last) = frames.last() {
        let _ = writeln!(out, "file '{}'", escape_path(&last.path));
    }
    out
}

fn escape_path(path: &Path) -> String {
    path.display().to_string().replace('\'', r"'\''")
}

fn epoch_secs(time: SystemTime) -> f64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Background task saving screencast frames until stopped.
pub struct ScreencastRecorder {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<Vec<CapturedFrame>>,
}

impl ScreencastRecorder {
    /// Start the screencast on `session` and begin saving frames.
    pub async fn start(session: Arc<PageSession>, options: CaptureOptions) -> Result<Self, CdpError> {
        let events = session
            .take_events()
            .ok_or_else(|| CdpError::InvalidResponse("Page events already consumed".to_string()))?;

        tokio::fs::create_dir_all(&options.dir)
            .await
            .map_err(|e| CdpError::InvalidResponse(format!("{}: {}", options.dir.display(), e)))?;

        session
            .start_screencast(
                ScreencastFormat::Jpeg,
                options.quality,
                options.max_width,
                options.max_height,
            )
            .await?;

        info!(dir = %options.dir.display(), "Screencast started");

        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(Self::capture_loop(session, events, options.dir, stop_rx));

        Ok(Self {
            stop_tx: Some(stop_tx),
            task,
        })
    }

    async fn capture_loop(
        session: Arc<PageSession>,
        mut events: mpsc::UnboundedReceiver<CdpResponse>,
        dir: PathBuf,
        mut stop_rx: oneshot::Receiver<()>,
    ) -> Vec<CapturedFrame> {
        let mut frames = Vec::new();

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                event = events.recv() => {
                    let Some(event) = event else {
                        warn!("Page event stream closed during capture");
                        break;
                    };
                    if event.method.as_deref() != Some("Page.screencastFrame") {
                        continue;
                    }
                    let Some(params) = event.params else { continue };
                    match serde_json::from_value::<ScreencastFrame>(params) {
                        Ok(frame) => {
                            if let Some(saved) = Self::save_frame(&session, &dir, frames.len(), frame).await {
                                frames.push(saved);
                            }
                        }
                        Err(e) => warn!("Malformed screencast frame: {}", e),
                    }
                }
            }
        }

        if let Err(e) = session.stop_screencast().await {
            debug!("Failed to stop screencast: {}", e);
        }
        frames
    }

    async fn save_frame(
        session: &PageSession,
        dir: &Path,
        index: usize,
        frame: ScreencastFrame,
    ) -> Option<CapturedFrame> {
        // Ack first so the browser keeps producing while we write.
        if let Err(e) = session.ack_screencast_frame(frame.session_id).await {
            warn!("Failed to ack screencast frame: {}", e);
        }

        let timestamp = frame
            .metadata
            .timestamp
            .unwrap_or_else(|| epoch_secs(SystemTime::now()));

        let bytes = match BASE64.decode(frame.data.as_bytes()) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Undecodable screencast frame: {}", e);
                return None;
            }
        };

        let path = dir.join(format!("frame_{:06}.jpg", index));
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            warn!("Failed to write {}: {}", path.display(), e);
            return None;
        }

        Some(CapturedFrame { path, timestamp })
    }

    /// Stop capturing and return the saved frames.
    pub async fn stop(mut self) -> Capture {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let frames = match (&mut self.task).await {
            Ok(frames) => frames,
            Err(e) => {
                warn!("Capture task failed: {}", e);
                Vec::new()
            }
        };
        let stopped_at = epoch_secs(SystemTime::now());
        info!(frames = frames.len(), "Screencast stopped");
        Capture { frames, stopped_at }
    }
}

impl Drop for ScreencastRecorder {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "recorder_tests.rs"]
mod tests;
