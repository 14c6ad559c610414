//! Cosine ease-in-out sampling for scroll animation.
//!
//! Pure and host independent: given start, end and duration it yields a lazy,
//! finite sequence of positions, one per display frame. Calling
//! [`EasingScheduler::frames`] again restarts the sequence.

use std::f64::consts::PI;
use std::time::Duration;

use director_protocols::Point;

/// `0.5 - cos(πt) / 2`, with `t` clamped to `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    0.5 - (PI * t).cos() / 2.0
}

/// One sampled animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasedFrame {
    /// Time since the animation started.
    pub offset: Duration,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasingScheduler {
    from: Point,
    to: Point,
    duration: Duration,
    frame: Duration,
}

impl EasingScheduler {
    /// Sample at `frame_rate` frames per second; zero is treated as one.
    pub fn new(from: Point, to: Point, duration: Duration, frame_rate: u32) -> Self {
        let frame = Duration::from_secs(1) / frame_rate.max(1);
        Self {
            from,
            to,
            duration,
            frame,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame
    }

    /// Linear progress after `elapsed`; a zero-length animation is complete at once.
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn position_at(&self, elapsed: Duration) -> Point {
        self.from.lerp(self.to, ease_in_out(self.progress_at(elapsed)))
    }

    /// Number of frames [`frames`](Self::frames) yields.
    pub fn frame_count(&self) -> usize {
        let duration = self.duration.as_nanos();
        let frame = self.frame.as_nanos().max(1);
        // Frames strictly before the end, then the closing frame.
        let inner = if duration == 0 { 0 } else { (duration - 1) / frame };
        inner as usize + 1
    }

    /// A fresh frame sequence ending exactly at the destination.
    pub fn frames(&self) -> Frames {
        Frames {
            scheduler: *self,
            next: 1,
            done: false,
        }
    }

    fn sample(&self, offset: Duration) -> EasedFrame {
        let progress = self.progress_at(offset);
        EasedFrame {
            offset,
            progress,
            position: self.from.lerp(self.to, ease_in_out(progress)),
        }
    }
}

/// Iterator over the frames of one animation.
#[derive(Debug, Clone)]
pub struct Frames {
    scheduler: EasingScheduler,
    next: u32,
    done: bool,
}

impl Iterator for Frames {
    type Item = EasedFrame;

    fn next(&mut self) -> Option<EasedFrame> {
        if self.done {
            return None;
        }
        let offset = self.scheduler.frame * self.next;
        if offset >= self.scheduler.duration {
            self.done = true;
            let mut last = self.scheduler.sample(self.scheduler.duration);
            last.position = self.scheduler.to;
            return Some(last);
        }
        self.next += 1;
        Some(self.scheduler.sample(offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self
            .scheduler
            .frame_count()
            .saturating_sub(self.next as usize - 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames {}
