//! Shared value types passed between the core and its host collaborators.

use serde::{Deserialize, Serialize};

/// A narration event: text plus the logical time it starts at.
///
/// Produced once per narration step by the dry run, consumed read-only by the
/// narration compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub text: String,
    /// Logical start, seconds from scenario start.
    pub start: f64,
    /// Position of this cue in narration order.
    pub sequence_id: usize,
    /// How long the subtitle stays on screen.
    pub display_ms: u64,
}

impl Cue {
    pub fn new(text: impl Into<String>, start: f64, sequence_id: usize, display_ms: u64) -> Self {
        Self {
            text: text.into(),
            start,
            sequence_id,
            display_ms,
        }
    }

    /// Delay of this cue on the master timeline, rounded to whole milliseconds.
    ///
    /// Negative starts are clamped to zero.
    pub fn delay_ms(&self) -> u64 {
        (self.start.max(0.0) * 1000.0).round() as u64
    }

    /// Logical time at which the subtitle display ends.
    pub fn display_end(&self) -> f64 {
        self.start + self.display_ms as f64 / 1000.0
    }
}

/// Scroll request: destination offset and animation length.
///
/// `x: None` is a vertical-only scroll; the horizontal offset is left as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollTarget {
    pub x: Option<f64>,
    pub y: f64,
    pub duration_ms: u64,
}

impl ScrollTarget {
    pub fn new(x: f64, y: f64, duration_ms: u64) -> Self {
        Self {
            x: Some(x),
            y,
            duration_ms,
        }
    }

    pub fn vertical(y: f64, duration_ms: u64) -> Self {
        Self {
            x: None,
            y,
            duration_ms,
        }
    }

    /// Where the animation ends when it starts from `current`.
    pub fn destination_from(&self, current: Point) -> Point {
        Point::new(self.x.unwrap_or(current.x), self.y)
    }
}

/// A 2D position in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `to`; `t` is not clamped.
    pub fn lerp(self, to: Point, t: f64) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// An element's bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Measurements of one scrollable candidate reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceMetrics {
    /// Host-side index used to address the element afterwards.
    pub index: usize,
    /// Computed `overflow-y` style.
    pub overflow_y: String,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl SurfaceMetrics {
    /// How far the content extends beyond the visible box.
    pub fn scrollable_extent(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// The surface a scroll animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRef {
    /// A candidate element, by its host-side index.
    Element(usize),
    /// The document's own scrolling element.
    Document,
}
