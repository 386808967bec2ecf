//! Timelines: several tweens laid out on one local clock.
//!
//! A timeline is not tied to a frame scheduler. It is positioned with [`Timeline::seek`] /
//! [`Timeline::set_progress`], either directly (scroll scrubbing) or by an animation run that
//! plays its local time forward or backward.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Tween;

/// Writes a tweened value to its target (an element property, a style value, ...).
pub type PropertySetter = Box<dyn FnMut(f64)>;

struct Track {
    tween: Tween,
    set: PropertySetter,
}

impl Track {
    fn value_at(&self, time_ms: f64, at_end: bool) -> f64 {
        let start = self.tween.start_ms as f64;
        let t = if self.tween.duration_ms == 0 {
            let reached = time_ms > start || (at_end && time_ms >= start);
            if reached { 1.0 } else { 0.0 }
        } else {
            (time_ms - start) / self.tween.duration_ms as f64
        };
        self.tween.interpolate(t)
    }
}

#[derive(Default)]
pub struct Timeline {
    tracks: Vec<Track>,
    duration_ms: u64,
    time_ms: f64,
    progress: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a track. `tween.start_ms` is the track's position on the timeline.
    pub fn add(mut self, tween: Tween, set: impl FnMut(f64) + 'static) -> Self {
        self.push(tween, Box::new(set));
        self
    }

    /// Adds one track per setter, each starting `each_ms` after the previous one.
    ///
    /// This is the staggered-reveal pattern: the same tween applied to a list of targets.
    pub fn stagger<I, F>(mut self, tween: Tween, each_ms: u64, setters: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: FnMut(f64) + 'static,
    {
        for (i, set) in setters.into_iter().enumerate() {
            let delay = each_ms.saturating_mul(i as u64);
            let track = Tween {
                start_ms: tween.start_ms.saturating_add(delay),
                ..tween
            };
            self.push(track, Box::new(set));
        }
        self
    }

    fn push(&mut self, tween: Tween, set: PropertySetter) {
        let end = tween.start_ms.saturating_add(tween.duration_ms);
        self.duration_ms = self.duration_ms.max(end);
        self.tracks.push(Track { tween, set });
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Progress in `[0, 1]`. A zero-length timeline is at 1 once sought past its start.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Moves the local clock to `time_ms` (clamped to the timeline) and applies every track.
    pub fn seek(&mut self, time_ms: f64) {
        let end = self.duration_ms as f64;
        let progress = if self.duration_ms == 0 {
            if time_ms > 0.0 { 1.0 } else { 0.0 }
        } else {
            time_ms.clamp(0.0, end) / end
        };
        self.apply(time_ms.clamp(0.0, end), progress);
    }

    pub fn set_progress(&mut self, progress: f64) {
        let p = progress.clamp(0.0, 1.0);
        self.apply(p * self.duration_ms as f64, p);
    }

    fn apply(&mut self, time_ms: f64, progress: f64) {
        self.time_ms = time_ms;
        self.progress = progress;
        let at_end = progress >= 1.0;
        for track in &mut self.tracks {
            let v = track.value_at(time_ms, at_end);
            (track.set)(v);
        }
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("tracks", &self.tracks.len())
            .field("duration_ms", &self.duration_ms)
            .field("time_ms", &self.time_ms)
            .field("progress", &self.progress)
            .finish()
    }
}
