//! Trigger bindings for the `smoothscroll` crate.
//!
//! `smoothscroll` knows how to animate; this crate decides *when*:
//!
//! - [`init_smooth_scrolling`] intercepts in-page anchor clicks and scrolls to the anchor
//! - [`use_scroll_animation`] watches an element cross viewport boundaries and drives a
//!   [`smoothscroll::Timeline`] (toggle actions or scroll scrubbing) plus edge callbacks
//!
//! Events reach bindings through an explicit [`EventBus`] owned by the application shell;
//! every binding holds its own [`Subscription`] and at most one animation run, and tearing a
//! binding down releases both before returning.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod actions;
mod anchor;
mod bus;
mod click;
mod error;
mod event;
mod position;
mod viewport;

#[cfg(test)]
mod tests;

pub use actions::{ToggleAction, ToggleActions};
pub use anchor::anchor_target;
pub use bus::{EventBus, Outcome, Subscription};
pub use click::{ANCHOR_EASING, ClickTrigger, HEADER_OFFSET, init_smooth_scrolling};
pub use error::Error;
pub use event::{ClickEvent, ScrollEvent};
pub use position::{Anchor, Edge, TriggerPosition};
pub use viewport::{
    Boundaries, SCRUB_EASING, Scrub, ScrollAnimation, ScrollAnimationOptions, TimelineBuilder,
    TriggerCallback, TriggerEdge, use_scroll_animation,
};
