//! Pure builders for ffmpeg/ffprobe command lines.

use std::path::{Path, PathBuf};

use director_protocols::MixPlan;

/// Sample rate of the silent base track.
pub const SAMPLE_RATE: u32 = 44_100;

/// Output encoding settings for the capture and finishing encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub crf: u8,
    pub preset: String,
    pub audio_bitrate: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            crf: 18,
            preset: "slow".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

/// Inputs of the finishing encode.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishJob {
    /// Constant-frame-rate raw capture.
    pub raw: PathBuf,
    /// Mixed narration; `None` yields a video-only result.
    pub master: Option<PathBuf>,
    /// Seconds of raw footage before the live run's zero.
    pub lead_in: f64,
    /// Inferred duration in seconds.
    pub duration: f64,
    pub output: PathBuf,
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

fn secs(value: f64) -> String {
    format!("{:.3}", value.max(0.0))
}

/// `ffprobe` arguments printing only the container duration.
pub fn duration_args(path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-show_entries".to_string(),
        "format=duration".to_string(),
        "-of".to_string(),
        "default=noprint_wrappers=1:nokey=1".to_string(),
        path_arg(path),
    ]
}

/// Filter graph summing every delayed clip over the silent base `[0:a]`.
pub fn mix_filter(plan: &MixPlan) -> String {
    let mut parts = Vec::with_capacity(plan.inputs.len() + 1);
    let mut labels = String::from("[0:a]");

    for (i, input) in plan.inputs.iter().enumerate() {
        let index = i + 1;
        parts.push(format!(
            "[{index}:a]adelay={d}|{d}[a{index}]",
            d = input.delay_ms
        ));
        labels.push_str(&format!("[a{index}]"));
    }

    parts.push(format!(
        "{labels}amix=inputs={}:duration=longest:normalize=0[out]",
        plan.inputs.len() + 1
    ));
    parts.join(";")
}

/// `ffmpeg` arguments for the master mix, bounded to `plan.length` seconds.
pub fn mix_args(plan: &MixPlan, output: &Path) -> Vec<String> {
    let length = secs(plan.length);
    let mut args = vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "lavfi".to_string(),
        "-t".to_string(),
        length.clone(),
        "-i".to_string(),
        format!("anullsrc=r={}:cl=stereo", SAMPLE_RATE),
    ];

    for input in &plan.inputs {
        args.push("-i".to_string());
        args.push(path_arg(&input.path));
    }

    args.extend([
        "-filter_complex".to_string(),
        mix_filter(plan),
        "-map".to_string(),
        "[out]".to_string(),
        "-t".to_string(),
        length,
        path_arg(output),
    ]);
    args
}

/// `ffmpeg` arguments turning an ffconcat frame manifest into a CFR video.
pub fn encode_args(manifest: &Path, settings: &EncodeSettings, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        path_arg(manifest),
        "-fps_mode".to_string(),
        "cfr".to_string(),
        "-r".to_string(),
        settings.fps.to_string(),
        // Screencast frames can have odd dimensions.
        "-vf".to_string(),
        "pad=ceil(iw/2)*2:ceil(ih/2)*2".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        "veryfast".to_string(),
        "-crf".to_string(),
        "12".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        path_arg(output),
    ]
}

/// Scale-to-cover then crop to the exact output frame.
pub fn finish_filter(settings: &EncodeSettings) -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h},setsar=1",
        w = settings.width,
        h = settings.height
    )
}

/// `ffmpeg` arguments for the final video.
pub fn finish_args(job: &FinishJob, settings: &EncodeSettings) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-ss".to_string(),
        secs(job.lead_in),
        "-t".to_string(),
        secs(job.duration),
        "-i".to_string(),
        path_arg(&job.raw),
    ];

    if let Some(master) = &job.master {
        args.push("-i".to_string());
        args.push(path_arg(master));
    }

    args.extend([
        "-vf".to_string(),
        finish_filter(settings),
        "-r".to_string(),
        settings.fps.to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        settings.preset.clone(),
        "-crf".to_string(),
        settings.crf.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
    ]);

    if job.master.is_some() {
        args.extend([
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            settings.audio_bitrate.clone(),
            "-map".to_string(),
            "0:v:0".to_string(),
            "-map".to_string(),
            "1:a:0".to_string(),
            "-t".to_string(),
            secs(job.duration),
        ]);
    } else {
        args.extend(["-map".to_string(), "0:v:0".to_string()]);
    }

    args.push(path_arg(&job.output));
    args
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
