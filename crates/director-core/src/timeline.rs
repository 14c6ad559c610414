//! Declarative scenario timeline.
//!
//! A timeline is a JSON array of steps:
//!
//! ```json
//! [
//!   { "at": 0, "say": "Welcome", "duration": 4000 },
//!   { "at": 4, "click": "Pricing", "scroll": [0, 800, 1500] },
//!   { "wait": 1000 }
//! ]
//! ```
//!
//! Each step expands to actions in a fixed order (`at`, `say`, `click`,
//! `scroll`, `wait`) and the timeline drives any [`ActionAdapter`] with them.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use director_protocols::{
    ActionAdapter, Scenario, ScheduleError, ScrollTarget, DEFAULT_SAY_DURATION_MS,
};

use crate::error::TimelineError;

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;

/// Scroll field of a step.
///
/// `[y, ms]` scrolls vertically only; `[x, y, ms]` sets both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrollSpec {
    Vertical(f64, f64),
    Full(f64, f64, f64),
}

impl ScrollSpec {
    fn duration(&self) -> f64 {
        match *self {
            ScrollSpec::Vertical(_, ms) | ScrollSpec::Full(_, _, ms) => ms,
        }
    }

    pub fn target(&self) -> ScrollTarget {
        match *self {
            ScrollSpec::Vertical(y, ms) => ScrollTarget::vertical(y, millis(ms)),
            ScrollSpec::Full(x, y, ms) => ScrollTarget::new(x, y, millis(ms)),
        }
    }
}

fn millis(ms: f64) -> u64 {
    ms.max(0.0).round() as u64
}

/// Latest anchor a timeline may name, one day in seconds.
pub const MAX_ANCHOR_SECS: f64 = 86_400.0;

/// One timeline entry. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Anchor time in seconds from scenario start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<f64>,

    /// Narration and subtitle text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub say: Option<String>,

    /// Subtitle display length in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Visible text of the element to click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollSpec>,

    /// Pause in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<f64>,
}

/// A single adapter call.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    At(f64),
    Say { text: String, display_ms: u64 },
    Click(String),
    Scroll(ScrollTarget),
    Wait(u64),
}

impl Action {
    /// Issue this action against `actions`.
    pub async fn apply(&self, actions: &mut dyn ActionAdapter) -> Result<(), ScheduleError> {
        match self {
            Action::At(seconds) => actions.at(*seconds).await,
            Action::Say { text, display_ms } => actions.say(text, *display_ms).await,
            Action::Click(target) => actions.click(target).await,
            Action::Scroll(target) => actions.scroll(*target).await,
            Action::Wait(ms) => actions.wait(*ms).await,
        }
    }
}

impl Step {
    /// Subtitle display length, falling back to the default for absent or zero.
    pub fn display_ms(&self) -> u64 {
        self.duration
            .map(millis)
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_SAY_DURATION_MS)
    }

    /// Expand into adapter calls in execution order.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(5);
        if let Some(at) = self.at {
            actions.push(Action::At(at));
        }
        if let Some(text) = self.say.as_deref().filter(|t| !t.is_empty()) {
            actions.push(Action::Say {
                text: text.to_string(),
                display_ms: self.display_ms(),
            });
        }
        if let Some(target) = self.click.as_deref().filter(|t| !t.is_empty()) {
            actions.push(Action::Click(target.to_string()));
        }
        if let Some(scroll) = self.scroll {
            actions.push(Action::Scroll(scroll.target()));
        }
        if let Some(ms) = self.wait.map(millis).filter(|ms| *ms > 0) {
            actions.push(Action::Wait(ms));
        }
        actions
    }
}

/// Something questionable about a timeline that does not stop it from running.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineWarning {
    pub step: usize,
    pub message: String,
}

/// An ordered, immutable list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    steps: Vec<Step>,
}

impl Timeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Load and validate a timeline file.
    pub fn load(path: &Path) -> Result<Self, TimelineError> {
        if !path.exists() {
            return Err(TimelineError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| TimelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let timeline = Self::parse(&content, path)?;
        debug!(path = %path.display(), steps = timeline.len(), "Loaded scenario timeline");
        Ok(timeline)
    }

    /// Parse and validate timeline JSON; `origin` only labels errors.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, TimelineError> {
        let timeline: Timeline =
            serde_json::from_str(content).map_err(|e| TimelineError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        timeline.validate()?;
        Ok(timeline)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Reject values no adapter can act on.
    pub fn validate(&self) -> Result<(), TimelineError> {
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(at) = step.at {
                if !at.is_finite() || at < 0.0 {
                    return Err(TimelineError::InvalidStep {
                        index,
                        message: format!("at must be a non-negative number of seconds, got {}", at),
                    });
                }
                if at > MAX_ANCHOR_SECS {
                    return Err(TimelineError::InvalidStep {
                        index,
                        message: format!("at must not exceed {} seconds, got {}", MAX_ANCHOR_SECS, at),
                    });
                }
            }
            let durations = [
                ("duration", step.duration),
                ("wait", step.wait),
                ("scroll duration", step.scroll.map(|s| s.duration())),
            ];
            for (field, ms) in durations {
                if let Some(ms) = ms.filter(|ms| !ms.is_finite() || *ms < 0.0) {
                    return Err(TimelineError::InvalidStep {
                        index,
                        message: format!("{} must be non-negative milliseconds, got {}", field, ms),
                    });
                }
            }
        }
        Ok(())
    }

    /// Report anchors that move backwards and steps that do nothing.
    pub fn warnings(&self) -> Vec<TimelineWarning> {
        let mut warnings = Vec::new();
        let mut last_anchor: Option<f64> = None;

        for (index, step) in self.steps.iter().enumerate() {
            if let Some(at) = step.at {
                if let Some(prev) = last_anchor.filter(|prev| at < *prev) {
                    warnings.push(TimelineWarning {
                        step: index,
                        message: format!(
                            "anchor {}s is earlier than the previous anchor {}s",
                            at, prev
                        ),
                    });
                }
                last_anchor = Some(last_anchor.map_or(at, |prev| prev.max(at)));
            }
            if step.duration.is_some() && step.say.as_deref().is_none_or(str::is_empty) {
                warnings.push(TimelineWarning {
                    step: index,
                    message: "duration has no effect without say".to_string(),
                });
            }
            if step.actions().is_empty() {
                warnings.push(TimelineWarning {
                    step: index,
                    message: "step has no actions".to_string(),
                });
            }
        }
        warnings
    }
}

#[async_trait]
impl Scenario for Timeline {
    fn len(&self) -> usize {
        self.steps.len()
    }

    async fn run(&self, actions: &mut dyn ActionAdapter) -> Result<(), ScheduleError> {
        for (index, step) in self.steps.iter().enumerate() {
            trace!(step = index, "Running timeline step");
            for action in step.actions() {
                action.apply(actions).await?;
            }
        }
        Ok(())
    }
}
