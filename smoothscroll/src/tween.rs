use crate::Easing;

/// A single eased interpolation between two values over a fixed duration.
///
/// `start_ms` is measured on whatever clock drives the tween: the host's frame clock for
/// scroll runs, or the local time of a [`crate::Timeline`] for timeline tracks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    /// `0` means the tween is complete as soon as it starts.
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    pub fn distance(&self) -> f64 {
        self.to - self.from
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.start_ms)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.is_done(now_ms) {
            return 1.0;
        }
        self.elapsed_ms(now_ms) as f64 / self.duration_ms as f64
    }

    pub fn sample(&self, now_ms: u64) -> f64 {
        self.interpolate(self.progress(now_ms))
    }

    /// Maps linear progress to a value.
    ///
    /// Progress at or past `1.0` yields exactly `to`, so a finished tween never lands on an
    /// approximation of its target.
    pub fn interpolate(&self, t: f64) -> f64 {
        if t >= 1.0 {
            return self.to;
        }
        if t <= 0.0 {
            return self.from;
        }
        self.from + self.distance() * self.easing.sample(t)
    }
}
