//! Command flows: plan, check, narrate and record.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use director_config::{Config, ConfigError, ConfigLoader, ConfigValidator};
use director_core::{
    infer, Inference, LiveScheduler, NarrationCompositor, NarrationOutcome, RunReport, Timeline,
    TimelineError,
};
use director_media_ffmpeg::FinishJob;
use director_protocols::{MediaError, ScheduleError, Stage, SynthesisError};
use director_stage_browser::cdp::{CdpError, PageSession};
use director_stage_browser::{
    BrowserError, BrowserManager, BrowserStage, Capture, CaptureOptions, DeviceProfile,
    ScreencastRecorder,
};

use crate::register;

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

/// JPEG quality of screencast frames.
const CAPTURE_QUALITY: u8 = 90;

/// Top-level failure of a command.
#[derive(Debug, Error)]
pub(crate) enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error("Live run failed: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Page setup failed: {0}")]
    Cdp(#[from] CdpError),

    #[error("Synthesizer unavailable: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Narration mix failed, see the log for details")]
    NarrationFailed,

    #[error("Capture encode failed: {0}")]
    Media(#[from] MediaError),

    #[error("Finishing failed, raw capture kept at {raw}: {source}")]
    Finish {
        raw: PathBuf,
        #[source]
        source: MediaError,
    },

    #[error("No frames were captured")]
    EmptyCapture,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) type Result<T> = std::result::Result<T, PipelineError>;

/// Files one recording produces, all under the output directory.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Artifacts {
    /// Intermediates: synthesized clips, the master mix and capture frames.
    pub work_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub master: PathBuf,
    pub frames_dir: PathBuf,
    /// Constant-frame-rate capture, kept as the recovery artifact.
    pub raw: PathBuf,
    pub output: PathBuf,
}

impl Artifacts {
    pub fn new(output_dir: &Path, stamp: &str) -> Self {
        let work_dir = output_dir.join(format!("work_{}", stamp));
        let audio_dir = work_dir.join("audio");
        Self {
            master: audio_dir.join("master.mp3"),
            frames_dir: work_dir.join("frames"),
            raw: output_dir.join(format!("raw_{}.mp4", stamp)),
            output: output_dir.join(format!("final_{}.mp4", stamp)),
            audio_dir,
            work_dir,
        }
    }
}

/// Local time stamp used in artifact names.
pub(crate) fn stamp() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

/// `path` relative to `base` unless already absolute.
pub(crate) fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Screencast settings: frames at the device's physical resolution.
pub(crate) fn capture_options(dir: PathBuf, device: DeviceProfile) -> CaptureOptions {
    let scale = device.metrics().device_scale_factor;
    CaptureOptions {
        dir,
        quality: CAPTURE_QUALITY,
        max_width: (device.width as f64 * scale).round() as u32,
        max_height: (device.height as f64 * scale).round() as u32,
    }
}

/// Combine the live outcome with the raw encode; a live failure takes precedence.
pub(crate) fn settle_capture(
    live: std::result::Result<RunReport, ScheduleError>,
    encoded: Result<()>,
) -> Result<RunReport> {
    match (live, encoded) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(e)) => Err(e),
        (Err(live), Ok(())) => Err(live.into()),
        (Err(live), Err(e)) => {
            error!("Raw capture encode failed too: {}", e);
            Err(live.into())
        }
    }
}

/// Human-readable dry-run summary.
pub(crate) fn render_plan(scenario: &Path, steps: usize, inference: &Inference) -> String {
    let mut out = format!("Scenario: {} ({} steps)\n", scenario.display(), steps);
    if inference.cues.is_empty() {
        out.push_str("No narration\n");
    }
    for cue in &inference.cues {
        out.push_str(&format!(
            "  #{:<3} {:>8.3}s  {:>5} ms  {}\n",
            cue.sequence_id, cue.start, cue.display_ms, cue.text
        ));
    }
    out.push_str(&format!(
        "Inferred duration: {} (max time {:.3}s)\n",
        inference.duration, inference.max_time
    ));
    out
}

pub(crate) fn plan_json(inference: &Inference) -> Result<String> {
    Ok(serde_json::to_string_pretty(inference)?)
}

fn load_config(config_path: &Path, work_dir: &Path) -> Result<Config> {
    let path = resolve(work_dir, config_path);
    info!("Loading configuration from {}", path.display());
    let mut config = ConfigLoader::load(&path)?;
    config.scenario = resolve(work_dir, &config.scenario);
    config.output_dir = resolve(work_dir, &config.output_dir);
    Ok(config)
}

/// Validate the configuration and the scenario, printing every finding.
pub(crate) fn check(config_path: &Path, work_dir: &Path) -> Result<()> {
    let config = load_config(config_path, work_dir)?;
    let validation = ConfigValidator::validate(&config)?;

    for err in &validation.errors {
        println!("error: {}: {}", err.path, err.message);
    }
    for warning in &validation.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }

    let timeline = Timeline::load(&config.scenario)?;
    let warnings = timeline.warnings();
    for warning in &warnings {
        println!("warning: step {}: {}", warning.step, warning.message);
    }

    validation.into_result()?;
    println!(
        "OK: {} steps, {} warnings",
        timeline.steps().len(),
        warnings.len()
    );
    Ok(())
}

/// A loaded, validated configuration and its scenario.
pub(crate) struct Pipeline {
    config: Config,
    timeline: Timeline,
}

impl Pipeline {
    /// Load and validate; fails before any side effect.
    pub fn load(config_path: &Path, work_dir: &Path) -> Result<Self> {
        let config = load_config(config_path, work_dir)?;
        config.target_url()?;

        let warnings = ConfigValidator::validate(&config)?.into_result()?;
        for warning in warnings {
            warn!("Config {}: {}", warning.path, warning.message);
        }

        let timeline = Timeline::load(&config.scenario)?;
        for warning in timeline.warnings() {
            warn!(step = warning.step, "{}", warning.message);
        }

        Ok(Self { config, timeline })
    }

    async fn dry_run(&self) -> Result<Inference> {
        let inference = infer(&self.timeline).await?;
        info!(
            cues = inference.cues.len(),
            max_time = inference.max_time,
            duration = %inference.duration,
            "Dry run complete"
        );
        Ok(inference)
    }

    pub async fn plan(&self, json: bool) -> Result<()> {
        let inference = self.dry_run().await?;
        if json {
            println!("{}", plan_json(&inference)?);
        } else {
            print!(
                "{}",
                render_plan(&self.config.scenario, self.timeline.steps().len(), &inference)
            );
        }
        Ok(())
    }

    async fn compose(
        &self,
        inference: &Inference,
        audio_dir: &Path,
        master: &Path,
    ) -> Result<NarrationOutcome> {
        let synthesizer = register::synthesizer(&self.config.voice)?;
        let compositor =
            NarrationCompositor::new(synthesizer, register::mixer(&self.config.media), audio_dir)
                .with_margin(self.config.media.master_margin_secs);

        if let Some(parent) = master.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let outcome = compositor
            .compose(
                &inference.cues,
                self.config.narration_voice(),
                inference.duration,
                master,
            )
            .await;
        for dropped in &outcome.dropped {
            warn!(
                cue = dropped.cue.sequence_id,
                "Narration cue dropped: {}", dropped.reason
            );
        }
        Ok(outcome)
    }

    /// Dry run and mix the master track only.
    pub async fn narrate(&self, output: Option<PathBuf>) -> Result<()> {
        let inference = self.dry_run().await?;
        let stamp = stamp();
        let artifacts = Artifacts::new(&self.config.output_dir, &stamp);
        let master = output.unwrap_or_else(|| {
            self.config
                .output_dir
                .join(format!("narration_{}.mp3", stamp))
        });

        let outcome = self.compose(&inference, &artifacts.audio_dir, &master).await?;
        self.remove_intermediates(&artifacts.work_dir).await;

        match outcome.master {
            Some(audio) => {
                println!(
                    "Narration: {} ({:.3}s, {} clips, {} dropped)",
                    audio.path.display(),
                    audio.length,
                    outcome.tracks.len(),
                    outcome.dropped.len()
                );
                Ok(())
            }
            None => Err(PipelineError::NarrationFailed),
        }
    }

    /// Full pipeline: plan, narrate, record live, encode, finish.
    pub async fn record(&self, prompt: bool) -> Result<()> {
        let url = self.config.target_url()?;
        let inference = self.dry_run().await?;
        let artifacts = Artifacts::new(&self.config.output_dir, &stamp());
        tokio::fs::create_dir_all(&artifacts.work_dir).await?;

        let outcome = self
            .compose(&inference, &artifacts.audio_dir, &artifacts.master)
            .await?;
        if outcome.master.is_none() {
            warn!("Recording without narration");
        }

        let device = register::device_profile(&self.config);
        let manager = BrowserManager::new(register::browser_config(&self.config));
        let session = manager.open_page().await?;

        let result = self
            .capture(&session, url, device, &inference, &outcome, &artifacts, prompt)
            .await;

        if let Err(e) = manager.close_page(&session).await {
            warn!("Failed to close page: {}", e);
        }
        if let Err(e) = manager.shutdown().await {
            warn!("Browser shutdown failed: {}", e);
        }

        let (report, capture) = result?;
        info!(
            late_anchors = report.late_anchors,
            max_lateness_ms = report.max_lateness.as_millis() as u64,
            narrated = report.narrated,
            "Raw capture ready: {}",
            artifacts.raw.display()
        );
        self.finish(&artifacts, &outcome, &inference, &report, &capture)
            .await
    }

    /// Live run under screencast, then the raw capture encode.
    ///
    /// A live failure is reported only after whatever was captured has been
    /// encoded, so the raw file survives.
    #[allow(clippy::too_many_arguments)]
    async fn capture(
        &self,
        session: &Arc<PageSession>,
        url: &str,
        device: DeviceProfile,
        inference: &Inference,
        outcome: &NarrationOutcome,
        artifacts: &Artifacts,
        prompt: bool,
    ) -> Result<(RunReport, Capture)> {
        let mut stage = BrowserStage::new(session.clone());
        if !self.config.live.progress_overlay {
            stage = stage.without_progress_overlay();
        }
        stage.prepare(url, device).await?;
        info!("Page ready: {}", url);

        if prompt && self.config.live.prompt {
            wait_for_enter().await?;
        }

        let recorder = ScreencastRecorder::start(
            session.clone(),
            capture_options(artifacts.frames_dir.clone(), device),
        )
        .await?;

        let stage: Arc<dyn Stage> = Arc::new(stage);
        let mut scheduler = LiveScheduler::new(stage, register::live_options(&self.config));
        if let Some(master) = outcome.master_path() {
            scheduler =
                scheduler.with_narration(register::player(&self.config.media), master.to_path_buf());
        }

        let live = scheduler.run(&self.timeline, inference.duration).await;
        let capture = recorder.stop().await;

        if let Err(e) = &live {
            error!("Live run failed: {}", e);
        }
        if capture.is_empty() {
            live?;
            return Err(PipelineError::EmptyCapture);
        }

        let encoded = match capture.write_manifest(&artifacts.frames_dir).await {
            Ok(manifest) => register::finisher(&self.config.media)
                .encode_capture(&manifest, &artifacts.raw)
                .await
                .map_err(PipelineError::from),
            Err(e) => Err(e.into()),
        };

        Ok((settle_capture(live, encoded)?, capture))
    }

    async fn finish(
        &self,
        artifacts: &Artifacts,
        outcome: &NarrationOutcome,
        inference: &Inference,
        report: &RunReport,
        capture: &Capture,
    ) -> Result<()> {
        let job = FinishJob {
            raw: artifacts.raw.clone(),
            master: outcome.master_path().map(Path::to_path_buf),
            lead_in: capture.lead_in(report.wall_zero),
            duration: inference.duration.as_secs_f64(),
            output: artifacts.output.clone(),
        };
        info!(lead_in = job.lead_in, "Finishing {}", job.output.display());

        register::finisher(&self.config.media)
            .finish(&job)
            .await
            .map_err(|source| PipelineError::Finish {
                raw: artifacts.raw.clone(),
                source,
            })?;

        self.remove_intermediates(&artifacts.work_dir).await;
        println!("Video: {}", artifacts.output.display());
        Ok(())
    }

    async fn remove_intermediates(&self, dir: &Path) {
        if self.config.media.keep_intermediates {
            info!("Keeping intermediates in {}", dir.display());
            return;
        }
        match tokio::fs::remove_dir_all(dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove {}: {}", dir.display(), e),
        }
    }
}

async fn wait_for_enter() -> Result<()> {
    println!("Press ENTER to start recording...");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(())
}
