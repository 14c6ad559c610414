//! Narration compositing: one clip per cue, mixed onto a single master.
//!
//! Every failure here degrades instead of aborting. A cue whose synthesis
//! fails is dropped; a failed mix leaves the run without narration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use director_protocols::{AudioMixer, Cue, MixInput, MixPlan, SynthesisRequest, Synthesizer};

use crate::inference::InferredDuration;

#[cfg(test)]
#[path = "narration_tests.rs"]
mod tests;

/// A synthesized clip for one cue.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrack {
    pub cue: Cue,
    pub path: PathBuf,
    /// Measured clip length; `None` when it could not be read.
    pub clip_duration: Option<f64>,
}

impl AudioTrack {
    /// Where the clip ends on the master timeline.
    pub fn end(&self) -> Option<f64> {
        self.clip_duration
            .map(|d| self.cue.delay_ms() as f64 / 1000.0 + d)
    }
}

/// A cue left out of the mix.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedCue {
    pub cue: Cue,
    pub reason: String,
}

/// The mixed narration file.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterAudio {
    pub path: PathBuf,
    /// Seconds.
    pub length: f64,
}

#[derive(Debug, Clone)]
pub struct NarrationOutcome {
    pub tracks: Vec<AudioTrack>,
    pub dropped: Vec<DroppedCue>,
    pub plan: MixPlan,
    /// `None` when mixing failed.
    pub master: Option<MasterAudio>,
    pub warnings: Vec<String>,
}

impl NarrationOutcome {
    pub fn master_path(&self) -> Option<&Path> {
        self.master.as_ref().map(|m| m.path.as_path())
    }
}

pub struct NarrationCompositor {
    synthesizer: Arc<dyn Synthesizer>,
    mixer: Arc<dyn AudioMixer>,
    work_dir: PathBuf,
    margin_secs: f64,
}

impl NarrationCompositor {
    pub fn new(
        synthesizer: Arc<dyn Synthesizer>,
        mixer: Arc<dyn AudioMixer>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            synthesizer,
            mixer,
            work_dir: work_dir.into(),
            margin_secs: 0.0,
        }
    }

    /// Extra master length past the inferred duration.
    pub fn with_margin(mut self, secs: f64) -> Self {
        self.margin_secs = secs.max(0.0);
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn track_path(&self, cue: &Cue) -> PathBuf {
        self.work_dir.join(format!(
            "track_{}.{}",
            cue.sequence_id,
            self.synthesizer.extension()
        ))
    }

    /// Synthesize every cue in order, dropping the ones that fail.
    pub async fn synthesize_tracks(
        &self,
        cues: &[Cue],
        voice: &str,
    ) -> (Vec<AudioTrack>, Vec<DroppedCue>) {
        let mut tracks = Vec::with_capacity(cues.len());
        let mut dropped = Vec::new();

        if cues.is_empty() {
            return (tracks, dropped);
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.work_dir).await {
            warn!(dir = %self.work_dir.display(), error = %e, "Cannot create audio work directory");
            let reason = format!("work directory unavailable: {}", e);
            dropped.extend(cues.iter().map(|cue| DroppedCue {
                cue: cue.clone(),
                reason: reason.clone(),
            }));
            return (tracks, dropped);
        }

        for cue in cues {
            let path = self.track_path(cue);
            let request = SynthesisRequest::new(cue.text.as_str(), voice);
            debug!(
                backend = self.synthesizer.id(),
                cue = cue.sequence_id,
                start = cue.start,
                "Synthesizing cue"
            );

            if let Err(e) = self.synthesizer.synthesize(&request, &path).await {
                warn!(cue = cue.sequence_id, text = %cue.text, error = %e, "Synthesis failed, dropping cue");
                dropped.push(DroppedCue {
                    cue: cue.clone(),
                    reason: e.to_string(),
                });
                continue;
            }

            let clip_duration = match self.mixer.measure_duration(&path).await {
                Ok(secs) => Some(secs),
                Err(e) => {
                    debug!(cue = cue.sequence_id, error = %e, "Could not measure clip length");
                    None
                }
            };

            tracks.push(AudioTrack {
                cue: cue.clone(),
                path,
                clip_duration,
            });
        }

        (tracks, dropped)
    }

    /// Place each track at its cue offset over a silent base of `length` seconds.
    pub fn plan(tracks: &[AudioTrack], length: f64) -> MixPlan {
        MixPlan {
            length,
            inputs: tracks
                .iter()
                .map(|t| MixInput {
                    path: t.path.clone(),
                    delay_ms: t.cue.delay_ms(),
                })
                .collect(),
        }
    }

    /// Clips that overlap the next one or run past the master's end.
    pub fn overlap_warnings(tracks: &[AudioTrack], length: f64) -> Vec<String> {
        let mut ordered: Vec<&AudioTrack> = tracks.iter().collect();
        ordered.sort_by_key(|t| t.cue.delay_ms());

        let mut warnings = Vec::new();
        for pair in ordered.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if let Some(end) = current.end() {
                let next_start = next.cue.delay_ms() as f64 / 1000.0;
                if end > next_start {
                    warnings.push(format!(
                        "cue {} overlaps cue {} by {:.2}s",
                        current.cue.sequence_id,
                        next.cue.sequence_id,
                        end - next_start
                    ));
                }
            }
        }
        for track in &ordered {
            if let Some(end) = track.end().filter(|end| *end > length) {
                warnings.push(format!(
                    "cue {} runs {:.2}s past the end of the master",
                    track.cue.sequence_id,
                    end - length
                ));
            }
        }
        warnings
    }

    /// Synthesize, plan and mix. Never fails; see [`NarrationOutcome::master`].
    pub async fn compose(
        &self,
        cues: &[Cue],
        voice: &str,
        duration: InferredDuration,
        output: &Path,
    ) -> NarrationOutcome {
        let length = duration.as_secs_f64() + self.margin_secs;
        let (tracks, dropped) = self.synthesize_tracks(cues, voice).await;

        let warnings = Self::overlap_warnings(&tracks, length);
        for warning in &warnings {
            warn!("{}", warning);
        }

        let plan = Self::plan(&tracks, length);
        let master = match self.mixer.mix(&plan, output).await {
            Ok(()) => {
                info!(
                    path = %output.display(),
                    length,
                    clips = plan.inputs.len(),
                    dropped = dropped.len(),
                    "Master audio ready"
                );
                Some(MasterAudio {
                    path: output.to_path_buf(),
                    length,
                })
            }
            Err(e) => {
                error!(error = %e, "Mixing failed, recording without narration");
                None
            }
        };

        NarrationOutcome {
            tracks,
            dropped,
            plan,
            master,
            warnings,
        }
    }
}
