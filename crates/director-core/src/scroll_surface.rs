//! Which surface a scroll drives.
//!
//! The stage reports every element with a scrolling `overflow-y`; this module
//! decides. Resolution runs at the start of every scroll and is never cached.

use director_protocols::{SurfaceMetrics, SurfaceRef};

/// Content must exceed the visible box by more than this to count as scrollable.
pub const SCROLL_SLACK_PX: f64 = 50.0;

/// Whether `metrics` describes a real scroll container.
pub fn qualifies(metrics: &SurfaceMetrics) -> bool {
    matches!(metrics.overflow_y.as_str(), "auto" | "scroll")
        && metrics.scroll_height > metrics.client_height + SCROLL_SLACK_PX
}

/// Pick the qualifying candidate with the largest scrollable extent.
///
/// Ties keep the earliest candidate. Falls back to the document when none qualify.
pub fn select_surface(candidates: &[SurfaceMetrics]) -> SurfaceRef {
    let mut best: Option<&SurfaceMetrics> = None;
    for candidate in candidates.iter().filter(|c| qualifies(c)) {
        if best.is_none_or(|b| candidate.scrollable_extent() > b.scrollable_extent()) {
            best = Some(candidate);
        }
    }
    best.map_or(SurfaceRef::Document, |m| SurfaceRef::Element(m.index))
}
