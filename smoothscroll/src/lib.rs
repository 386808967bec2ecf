//! A headless smooth-scroll and easing engine.
//!
//! For trigger bindings (anchor-click interception, viewport triggers), see the
//! `smoothscroll-trigger` crate.
//!
//! The engine owns the math and the per-frame state; it never touches a UI directly. A host is
//! expected to provide:
//! - element geometry and a readable/writable scroll offset ([`ScrollHost`])
//! - a display-refresh callback ([`FrameScheduler`])
//!
//! Everything runs on one thread: runs advance one step per scheduled frame and yield back to
//! the host in between.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod easing;
mod error;
mod host;
mod options;
mod run;
mod scheduler;
mod scroller;
mod timeline;
mod tween;


pub use easing::Easing;
pub use error::Error;
pub use host::{Bounds, MemoryHost, ScrollHost};
pub use options::{AnimationConfig, DEFAULT_DURATION_MS, ScrollOptions};
pub use run::{AnimationSpec, OnComplete, RunHandle, RunSlot, animate};
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler, ManualScheduler};
pub use scroller::SmoothScroller;
pub use timeline::{PropertySetter, Timeline};
pub use tween::Tween;
