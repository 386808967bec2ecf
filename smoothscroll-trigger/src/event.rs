use alloc::string::{String, ToString};

/// An activation (click, tap, keyboard "enter") dispatched by the application shell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickEvent {
    /// The `href` of the nearest link enclosing the activated element, if any.
    pub href: Option<String>,
}

impl ClickEvent {
    pub fn on_link(href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
        }
    }

    pub fn outside_link() -> Self {
        Self { href: None }
    }
}

/// A scroll position update.
///
/// Any source may publish these: native scroll events, or an external smoothing engine
/// reporting its virtual offset each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEvent {
    pub offset: f64,
    /// Viewport size along the scroll axis.
    pub viewport: f64,
}

impl ScrollEvent {
    pub fn new(offset: f64, viewport: f64) -> Self {
        Self { offset, viewport }
    }
}
