use alloc::boxed::Box;
use core::fmt;

use crate::{AnimationSpec, Easing, OnComplete};

pub const DEFAULT_DURATION_MS: u64 = 800;

/// The serializable part of a scroll request.
///
/// With `feature = "serde"`, missing fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AnimationConfig {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Signed adjustment applied to the resolved target position.
    pub offset: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
            offset: 0.0,
        }
    }
}

impl AnimationConfig {
    pub fn spec(&self) -> AnimationSpec {
        AnimationSpec::new(self.duration_ms, self.easing)
    }
}

/// Options for [`crate::SmoothScroller`].
pub struct ScrollOptions {
    pub duration_ms: u64,
    pub easing: Easing,
    pub offset: f64,
    pub on_complete: Option<OnComplete>,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self::from(AnimationConfig::default())
    }
}

impl From<AnimationConfig> for ScrollOptions {
    fn from(config: AnimationConfig) -> Self {
        Self {
            duration_ms: config.duration_ms,
            easing: config.easing,
            offset: config.offset,
            on_complete: None,
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_on_complete(mut self, on_complete: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    pub fn config(&self) -> AnimationConfig {
        AnimationConfig {
            duration_ms: self.duration_ms,
            easing: self.easing,
            offset: self.offset,
        }
    }
}

impl fmt::Debug for ScrollOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("duration_ms", &self.duration_ms)
            .field("easing", &self.easing)
            .field("offset", &self.offset)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
